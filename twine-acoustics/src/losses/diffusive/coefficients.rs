//! Precomputed coefficient sets of the diffusive representation.
//!
//! Each set approximates `h(q) − q` by `a0 + Σᵢ aᵢ q / (1 + bᵢ q)` with
//! `a0 = 8`, the Poiseuille limit, so that every order is exact at low
//! frequency. Poles `1/bᵢ` are spaced geometrically and the residues `aᵢ`
//! minimize the worst relative error for `q = jw`, `w` in `[10, 10⁶]`.
//! All residues are positive, which keeps every branch of the network
//! dissipative.
//!
//! | order | worst relative error |
//! |-------|----------------------|
//! | 1     | 7.1e-01              |
//! | 2     | 4.1e-01              |
//! | 3     | 2.0e-01              |
//! | 4     | 9.6e-02              |
//! | 5     | 4.8e-02              |
//! | 6     | 2.8e-02              |
//! | 7     | 1.9e-02              |
//! | 8     | 9.4e-03              |
//! | 16    | 6.3e-04              |

use super::DiffReprCoefficients;

/// Orders with a precomputed coefficient set.
pub const AVAILABLE_ORDERS: [usize; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 16];

const A0: f64 = 8.0;

const AI_1: [f64; 1] = [
    0.023071215497534953,
];

const BI_1: [f64; 1] = [
    2.2907462537743854e-05,
];

const AI_2: [f64; 2] = [
    0.10562767711603721,
    0.004793229812760386,
];

const BI_2: [f64; 2] = [
    0.000812751548929221,
    1.7550546569602994e-06,
];

const AI_3: [f64; 3] = [
    0.18396555922746627,
    0.021949696296077452,
    0.0029051517706404173,
];

const BI_3: [f64; 3] = [
    0.004677062238395897,
    6.838905057387412e-05,
    1.0000000000000004e-06,
];

const AI_4: [f64; 4] = [
    0.21614417658620905,
    0.042998808734915836,
    0.008378975053554429,
    0.002094265114893957,
];

const BI_4: [f64; 4] = [
    0.011219689052034371,
    0.00043316424580602553,
    1.672339250887541e-05,
    6.456485264278923e-07,
];

const AI_5: [f64; 5] = [
    0.2172972320545512,
    0.058748839948295994,
    0.0159847480300315,
    0.004182953048315775,
    0.0016349859564672381,
];

const BI_5: [f64; 5] = [
    0.017377394345044508,
    0.0012547530994780288,
    9.060077186420601e-05,
    6.541924356118017e-06,
    4.7236655274101494e-07,
];

const AI_6: [f64; 6] = [
    0.20819741337080697,
    0.06993658236751031,
    0.022048193525985846,
    0.007426950477367202,
    0.002232439266837091,
    0.0012261951621122301,
];

const BI_6: [f64; 6] = [
    0.02231301601484298,
    0.0023457028809379774,
    0.0002465969639416069,
    2.5924026064589182e-05,
    2.725317930340128e-06,
    2.8650479686019024e-07,
];

const AI_7: [f64; 7] = [
    0.20431761238036358,
    0.07099707456797143,
    0.028377790128856,
    0.00974989775870516,
    0.003888807763976424,
    0.0012608846939964364,
    0.0008875635522169847,
];

const BI_7: [f64; 7] = [
    0.025283959580474642,
    0.003450201408080545,
    0.00047080797287437845,
    6.424556746250867e-05,
    8.766828890727097e-06,
    1.1963049255365124e-06,
    1.6324551245395848e-07,
];

const AI_8: [f64; 8] = [
    0.1945080041762376,
    0.07777463832268855,
    0.031634149244463214,
    0.01262053621240951,
    0.005067140966185508,
    0.002016718381606833,
    0.0007711299919833804,
    0.0005812757583927869,
];

const BI_8: [f64; 8] = [
    0.028650479686019005,
    0.004585809059900904,
    0.0007340067239478485,
    0.00011748545649484489,
    1.880477662869858e-05,
    3.0099012644238634e-06,
    4.817661916682558e-07,
    7.711171996831675e-08,
];

const AI_16: [f64; 16] = [
    0.1419039296315381,
    0.06151611696926186,
    0.04704707611995188,
    0.02931341236657248,
    0.018824125993557702,
    0.012685890426018845,
    0.007682487819797694,
    0.005337591930663463,
    0.003205600424044796,
    0.002199163260035765,
    0.0013647881057365194,
    0.00087744749022215,
    0.0006532767821551233,
    0.00013460426012015407,
    0.0004804960752543673,
    0.000370442450859158,
];

const BI_16: [f64; 16] = [
    0.039160562667679887,
    0.01631049047664653,
    0.006793367650162488,
    0.0028294577711413292,
    0.0011784775520695644,
    0.0004908393950589568,
    0.00020443606356247397,
    8.51482267023411e-05,
    3.5464488917522385e-05,
    1.4771064799479699e-05,
    6.152192290655771e-06,
    2.5624063325846034e-06,
    1.0672498360043627e-06,
    4.445127214864671e-07,
    1.8514086664380403e-07,
    7.711171996831675e-08,
];

/// Returns the set of the given order, if one was precomputed.
pub(super) fn table(order: usize) -> Option<DiffReprCoefficients> {
    let (ai, bi): (&[f64], &[f64]) = match order {
        0 => (&[], &[]),
        1 => (&AI_1, &BI_1),
        2 => (&AI_2, &BI_2),
        3 => (&AI_3, &BI_3),
        4 => (&AI_4, &BI_4),
        5 => (&AI_5, &BI_5),
        6 => (&AI_6, &BI_6),
        7 => (&AI_7, &BI_7),
        8 => (&AI_8, &BI_8),
        16 => (&AI_16, &BI_16),
        _ => return None,
    };

    Some(DiffReprCoefficients {
        a0: A0,
        ai: ai.to_vec(),
        bi: bi.to_vec(),
    })
}
