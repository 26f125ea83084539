//! Deep-space (SDP4) perturbations.
//!
//! Orbits with periods of 225 minutes and up pick up secular and
//! long-period lunar/solar perturbations, and, when the mean motion is
//! commensurate with the Earth's rotation, resonance terms advanced by a
//! fixed-step integrator. Initialization runs the 20-term geometric
//! reduction twice, first against the Sun and then against the Moon; the
//! lunar pass adds its secular contributions to the solar ones.

use super::consts::*;
use crate::time::fmod2p;
use crate::tle::OrbitalElements;
use log::debug;
use std::f64::consts::PI;

/* synchronous resonance phase offsets */
const FASX2: f64 = 0.13130908;
const FASX4: f64 = 2.8843198;
const FASX6: f64 = 0.37448087;

/* integrator step: 720 minutes, with step2 = stepp^2 / 2 */
const STEPP: f64 = 720.0;
const STEPN: f64 = -720.0;
const STEP2: f64 = 259200.0;

/// Elements being advanced through the deep-space corrections during a
/// single propagation.
#[derive(Debug, Clone, Copy)]
pub(super) struct DsState {
    pub xll: f64,
    pub omgasm: f64,
    pub xnodes: f64,
    pub em: f64,
    pub xinc: f64,
    pub xn: f64,
}

/// Inputs to deep-space initialization, all computed by `set_tle`.
pub(super) struct DeepSpaceContext<'a> {
    pub els: &'a OrbitalElements,
    pub aodp: f64,
    pub xnodp: f64,
    pub eosq: f64,
    pub betao: f64,
    pub betao2: f64,
    pub sinio: f64,
    pub cosio: f64,
    pub theta2: f64,
    pub xmdot: f64,
    pub omgdot: f64,
    pub xnodot: f64,
}

/// Precomputed deep-space perturbation state.
#[derive(Debug, Clone, Default)]
pub(super) struct DeepSpace {
    /* epoch references */
    pub gsto: f64,
    pub zmos: f64,
    pub zmol: f64,
    pub eq: f64,
    pub xqncl: f64,
    pub omegaq: f64,
    pub xnq: f64,

    /* lunar + solar secular rates */
    pub sse: f64,
    pub ssi: f64,
    pub ssl: f64,
    pub ssg: f64,
    pub ssh: f64,

    /* solar long-period coefficients */
    pub se2: f64,
    pub se3: f64,
    pub si2: f64,
    pub si3: f64,
    pub sl2: f64,
    pub sl3: f64,
    pub sl4: f64,
    pub sgh2: f64,
    pub sgh3: f64,
    pub sgh4: f64,
    pub sh2: f64,
    pub sh3: f64,

    /* lunar long-period coefficients */
    pub ee2: f64,
    pub e3: f64,
    pub xi2: f64,
    pub xi3: f64,
    pub xl2: f64,
    pub xl3: f64,
    pub xl4: f64,
    pub xgh2: f64,
    pub xgh3: f64,
    pub xgh4: f64,
    pub xh2: f64,
    pub xh3: f64,

    pub resonance: Option<Resonance>,
}

#[derive(Debug, Clone)]
pub(super) struct Resonance {
    pub kind: ResonanceKind,
    pub xlamo: f64,
    pub xfact: f64,

    /* integrator state: the only values mutated after initialization */
    pub atime: f64,
    pub xli: f64,
    pub xni: f64,
}

#[derive(Debug, Clone)]
pub(super) enum ResonanceKind {
    /// 24-hour geosynchronous commensurability.
    Synchronous { del1: f64, del2: f64, del3: f64 },
    /// 12-hour (Molniya class) commensurability.
    SemiSynchronous {
        d2201: f64,
        d2211: f64,
        d3210: f64,
        d3222: f64,
        d4410: f64,
        d4422: f64,
        d5220: f64,
        d5232: f64,
        d5421: f64,
        d5433: f64,
    },
}

/// Resonance eccentricity functions for the 12-hour regime, piecewise
/// polynomial in e.
#[derive(Debug, Clone, Copy)]
pub(super) struct ResonanceGs {
    pub g201: f64,
    pub g211: f64,
    pub g310: f64,
    pub g322: f64,
    pub g410: f64,
    pub g422: f64,
    pub g520: f64,
    pub g521: f64,
    pub g532: f64,
    pub g533: f64,
}

pub(super) fn semi_synchronous_gs(eq: f64, eosq: f64) -> ResonanceGs {
    let eoc = eq * eosq;

    let g201 = -0.306 - (eq - 0.64) * 0.440;

    let (g211, g310, g322, g410, g422, g520) = if eq <= 0.65 {
        (
            3.616 - 13.247 * eq + 16.290 * eosq,
            -19.302 + 117.390 * eq - 228.419 * eosq + 156.591 * eoc,
            -18.9068 + 109.7927 * eq - 214.6334 * eosq + 146.5816 * eoc,
            -41.122 + 242.694 * eq - 471.094 * eosq + 313.953 * eoc,
            -146.407 + 841.880 * eq - 1629.014 * eosq + 1083.435 * eoc,
            -532.114 + 3017.977 * eq - 5740.0 * eosq + 3708.276 * eoc,
        )
    } else {
        (
            -72.099 + 331.819 * eq - 508.738 * eosq + 266.724 * eoc,
            -346.844 + 1582.851 * eq - 2415.925 * eosq + 1246.113 * eoc,
            -342.585 + 1554.908 * eq - 2366.899 * eosq + 1215.972 * eoc,
            -1052.797 + 4758.686 * eq - 7193.992 * eosq + 3651.957 * eoc,
            -3581.69 + 16178.11 * eq - 24462.77 * eosq + 12422.52 * eoc,
            if eq <= 0.715 {
                1464.74 - 4664.75 * eq + 3763.64 * eosq
            } else {
                -5149.66 + 29936.92 * eq - 54087.36 * eosq + 31324.56 * eoc
            },
        )
    };

    let (g533, g521, g532) = if eq < 0.7 {
        (
            -919.2277 + 4988.61 * eq - 9064.77 * eosq + 5542.21 * eoc,
            -822.71072 + 4568.6173 * eq - 8491.4146 * eosq + 5337.524 * eoc,
            -853.666 + 4690.25 * eq - 8624.77 * eosq + 5341.4 * eoc,
        )
    } else {
        (
            -37995.78 + 161616.52 * eq - 229838.2 * eosq + 109377.94 * eoc,
            -51752.104 + 218913.95 * eq - 309468.16 * eosq + 146349.42 * eoc,
            -40023.88 + 170470.89 * eq - 242699.48 * eosq + 115605.82 * eoc,
        )
    };

    ResonanceGs {
        g201,
        g211,
        g310,
        g322,
        g410,
        g422,
        g520,
        g521,
        g532,
        g533,
    }
}

impl DeepSpace {
    pub(super) fn initialize(ctx: &DeepSpaceContext) -> DeepSpace {
        let els = ctx.els;
        let eq = els.eccentricity;

        let mut ds = DeepSpace {
            gsto: els.epoch.to_gmst(),
            eq,
            xqncl: els.inclination,
            omegaq: els.argument_perigee,
            xnq: ctx.xnodp,
            ..DeepSpace::default()
        };

        /* initialize lunar solar terms */
        let day = els.epoch.days_since_1900();

        let xnodce = 4.5236020 - 9.2422029e-4 * day;
        let (stem, ctem) = xnodce.sin_cos();
        let zcosil = 0.91375164 - 0.03568096 * ctem;
        let zsinil = (1.0 - zcosil * zcosil).sqrt();
        let zsinhl = 0.089683511 * stem / zsinil;
        let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
        let c = 4.7199672 + 0.22997150 * day;
        let gam = 5.8351514 + 0.0019443680 * day;
        ds.zmol = fmod2p(c - gam);
        let zx = 0.39785416 * stem / zsinil;
        let zy = zcoshl * ctem + 0.91744867 * zsinhl * stem;
        let zx = gam + zx.atan2(zy) - xnodce;
        let zcosgl = zx.cos();
        let zsingl = zx.sin();
        ds.zmos = fmod2p(6.2565837 + 0.017201977 * day);

        let (sinq, cosq) = els.ascending_node.sin_cos();
        let (sing, cosg) = els.argument_perigee.sin_cos();
        let xnoi = 1.0 / ctx.xnodp;

        /* do solar terms first, then repeat with lunar geometry */
        let mut zcosg = ZCOSGS;
        let mut zsing = ZSINGS;
        let mut zcosi = ZCOSIS;
        let mut zsini = ZSINIS;
        let mut zcosh = cosq;
        let mut zsinh = sinq;
        let mut cc = C1SS;
        let mut zn = ZNS;
        let mut ze = ZES;

        for lunar in [false, true] {
            let a1 = zcosg * zcosh + zsing * zcosi * zsinh;
            let a3 = -zsing * zcosh + zcosg * zcosi * zsinh;
            let a7 = -zcosg * zsinh + zsing * zcosi * zcosh;
            let a8 = zsing * zsini;
            let a9 = zsing * zsinh + zcosg * zcosi * zcosh;
            let a10 = zcosg * zsini;
            let a2 = ctx.cosio * a7 + ctx.sinio * a8;
            let a4 = ctx.cosio * a9 + ctx.sinio * a10;
            let a5 = -ctx.sinio * a7 + ctx.cosio * a8;
            let a6 = -ctx.sinio * a9 + ctx.cosio * a10;

            let x1 = a1 * cosg + a2 * sing;
            let x2 = a3 * cosg + a4 * sing;
            let x3 = -a1 * sing + a2 * cosg;
            let x4 = -a3 * sing + a4 * cosg;
            let x5 = a5 * sing;
            let x6 = a6 * sing;
            let x7 = a5 * cosg;
            let x8 = a6 * cosg;

            let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
            let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
            let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
            let mut z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * ctx.eosq;
            let mut z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * ctx.eosq;
            let mut z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * ctx.eosq;
            let z11 = -6.0 * a1 * a5 + ctx.eosq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
            let z12 = -6.0 * (a1 * a6 + a3 * a5)
                + ctx.eosq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
            let z13 = -6.0 * a3 * a6 + ctx.eosq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
            let z21 = 6.0 * a2 * a5 + ctx.eosq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
            let z22 = 6.0 * (a4 * a5 + a2 * a6)
                + ctx.eosq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
            let z23 = 6.0 * a4 * a6 + ctx.eosq * (24.0 * x2 * x6 - 6.0 * x4 * x8);
            z1 = z1 + z1 + ctx.betao2 * z31;
            z2 = z2 + z2 + ctx.betao2 * z32;
            z3 = z3 + z3 + ctx.betao2 * z33;

            let s3 = cc * xnoi;
            let s2 = -0.5 * s3 / ctx.betao;
            let s4 = s3 * ctx.betao;
            let s1 = -15.0 * eq * s4;
            let s5 = x1 * x3 + x2 * x4;
            let s6 = x2 * x3 + x1 * x4;
            let s7 = x2 * x4 - x1 * x3;

            let se = s1 * zn * s5;
            let si = s2 * zn * (z11 + z13);
            let sl = -zn * s3 * (z1 + z3 - 14.0 - 6.0 * ctx.eosq);
            let sgh = s4 * zn * (z31 + z33 - 6.0);
            /* the node rate blows up at the equator; the term is dropped
             * within three degrees of i = 0 or i = 180 */
            let shdq = if els.inclination < 5.2359877e-2
                || els.inclination > PI - 5.2359877e-2
            {
                0.0
            } else {
                -zn * s2 * (z21 + z23) / ctx.sinio
            };

            ds.ee2 = 2.0 * s1 * s6;
            ds.e3 = 2.0 * s1 * s7;
            ds.xi2 = 2.0 * s2 * z12;
            ds.xi3 = 2.0 * s2 * (z13 - z11);
            ds.xl2 = -2.0 * s3 * z2;
            ds.xl3 = -2.0 * s3 * (z3 - z1);
            ds.xl4 = -2.0 * s3 * (-21.0 - 9.0 * ctx.eosq) * ze;
            ds.xgh2 = 2.0 * s4 * z32;
            ds.xgh3 = 2.0 * s4 * (z33 - z31);
            ds.xgh4 = -18.0 * s4 * ze;
            ds.xh2 = -2.0 * s2 * z22;
            ds.xh3 = -2.0 * s2 * (z23 - z21);

            if !lunar {
                /* keep the solar values and switch to lunar geometry */
                ds.sse = se;
                ds.ssi = si;
                ds.ssl = sl;
                ds.ssh = shdq;
                ds.ssg = sgh - ctx.cosio * ds.ssh;
                ds.se2 = ds.ee2;
                ds.si2 = ds.xi2;
                ds.sl2 = ds.xl2;
                ds.sgh2 = ds.xgh2;
                ds.sh2 = ds.xh2;
                ds.se3 = ds.e3;
                ds.si3 = ds.xi3;
                ds.sl3 = ds.xl3;
                ds.sgh3 = ds.xgh3;
                ds.sh3 = ds.xh3;
                ds.sl4 = ds.xl4;
                ds.sgh4 = ds.xgh4;
                zcosg = zcosgl;
                zsing = zsingl;
                zcosi = zcosil;
                zsini = zsinil;
                zcosh = zcoshl * cosq + zsinhl * sinq;
                zsinh = sinq * zcoshl - cosq * zsinhl;
                zn = ZNL;
                cc = C1L;
                ze = ZEL;
            } else {
                /* lunar secular contributions add to the solar ones */
                ds.sse += se;
                ds.ssi += si;
                ds.ssl += sl;
                ds.ssg += sgh - ctx.cosio * shdq;
                ds.ssh += shdq;
            }
        }

        ds.resonance = ds.classify_resonance(ctx);
        ds
    }

    /// Geopotential resonance selection and integrator seeding.
    fn classify_resonance(&self, ctx: &DeepSpaceContext) -> Option<Resonance> {
        let els = ctx.els;
        let eq = els.eccentricity;
        let aqnv = 1.0 / ctx.aodp;
        let xpidot = ctx.omgdot + ctx.xnodot;

        let (kind, xlamo, bfact) = if ctx.xnodp < 0.0052359877 && ctx.xnodp > 0.0034906585 {
            /* 24h synchronous resonance */
            let g200 = 1.0 + ctx.eosq * (-2.5 + 0.8125 * ctx.eosq);
            let g310 = 1.0 + 2.0 * ctx.eosq;
            let g300 = 1.0 + ctx.eosq * (-6.0 + 6.60937 * ctx.eosq);
            let f220 = 0.75 * (1.0 + ctx.cosio) * (1.0 + ctx.cosio);
            let f311 =
                0.9375 * ctx.sinio * ctx.sinio * (1.0 + 3.0 * ctx.cosio) - 0.75 * (1.0 + ctx.cosio);
            let mut f330 = 1.0 + ctx.cosio;
            f330 = 1.875 * f330 * f330 * f330;

            let del1 = 3.0 * ctx.xnodp * ctx.xnodp * aqnv * aqnv;
            let del2 = 2.0 * del1 * f220 * g200 * Q22;
            let del3 = 3.0 * del1 * f330 * g300 * Q33 * aqnv;
            let del1 = del1 * f311 * g310 * Q31 * aqnv;

            debug!("24-hour synchronous resonance");
            (
                ResonanceKind::Synchronous { del1, del2, del3 },
                els.mean_anomaly + els.ascending_node + els.argument_perigee - self.gsto,
                ctx.xmdot + xpidot - THDT + self.ssl + self.ssg + self.ssh,
            )
        } else if (0.00826..=0.00924).contains(&ctx.xnodp) && eq >= 0.5 {
            /* geopotential resonance initialization for 12 hour orbits */
            let gs = semi_synchronous_gs(eq, ctx.eosq);

            let sini2 = ctx.sinio * ctx.sinio;
            let f220 = 0.75 * (1.0 + 2.0 * ctx.cosio + ctx.theta2);
            let f221 = 1.5 * sini2;
            let f321 = 1.875 * ctx.sinio * (1.0 - 2.0 * ctx.cosio - 3.0 * ctx.theta2);
            let f322 = -1.875 * ctx.sinio * (1.0 + 2.0 * ctx.cosio - 3.0 * ctx.theta2);
            let f441 = 35.0 * sini2 * f220;
            let f442 = 39.3750 * sini2 * sini2;
            let f522 = 9.84375
                * ctx.sinio
                * (sini2 * (1.0 - 2.0 * ctx.cosio - 5.0 * ctx.theta2)
                    + 0.33333333 * (-2.0 + 4.0 * ctx.cosio + 6.0 * ctx.theta2));
            let f523 = ctx.sinio
                * (4.92187512 * sini2 * (-2.0 - 4.0 * ctx.cosio + 10.0 * ctx.theta2)
                    + 6.56250012 * (1.0 + 2.0 * ctx.cosio - 3.0 * ctx.theta2));
            let f542 = 29.53125
                * ctx.sinio
                * (2.0 - 8.0 * ctx.cosio
                    + ctx.theta2 * (-12.0 + 8.0 * ctx.cosio + 10.0 * ctx.theta2));
            let f543 = 29.53125
                * ctx.sinio
                * (-2.0 - 8.0 * ctx.cosio
                    + ctx.theta2 * (12.0 + 8.0 * ctx.cosio - 10.0 * ctx.theta2));

            let xno2 = ctx.xnodp * ctx.xnodp;
            let ainv2 = aqnv * aqnv;
            let mut temp1 = 3.0 * xno2 * ainv2;
            let mut temp = temp1 * ROOT22;
            let d2201 = temp * f220 * gs.g201;
            let d2211 = temp * f221 * gs.g211;
            temp1 *= aqnv;
            temp = temp1 * ROOT32;
            let d3210 = temp * f321 * gs.g310;
            let d3222 = temp * f322 * gs.g322;
            temp1 *= aqnv;
            temp = 2.0 * temp1 * ROOT44;
            let d4410 = temp * f441 * gs.g410;
            let d4422 = temp * f442 * gs.g422;
            temp1 *= aqnv;
            temp = temp1 * ROOT52;
            let d5220 = temp * f522 * gs.g520;
            let d5232 = temp * f523 * gs.g532;
            temp = 2.0 * temp1 * ROOT54;
            let d5421 = temp * f542 * gs.g521;
            let d5433 = temp * f543 * gs.g533;

            debug!("12-hour semi-synchronous resonance");
            (
                ResonanceKind::SemiSynchronous {
                    d2201,
                    d2211,
                    d3210,
                    d3222,
                    d4410,
                    d4422,
                    d5220,
                    d5232,
                    d5421,
                    d5433,
                },
                els.mean_anomaly + 2.0 * els.ascending_node - 2.0 * self.gsto,
                ctx.xmdot + 2.0 * ctx.xnodot - 2.0 * THDT + self.ssl + 2.0 * self.ssh,
            )
        } else {
            return None;
        };

        Some(Resonance {
            kind,
            xlamo,
            xfact: bfact - ctx.xnodp,
            atime: 0.0,
            xli: xlamo,
            xni: ctx.xnodp,
        })
    }

    /// Deep-space secular effects, including the resonance integrator.
    pub(super) fn secular(&mut self, t: f64, omgdot: f64, s: &mut DsState) {
        s.xll += self.ssl * t;
        s.omgasm += self.ssg * t;
        s.xnodes += self.ssh * t;
        s.em = self.eq + self.sse * t;
        s.xinc = self.xqncl + self.ssi * t;
        if s.xinc < 0.0 {
            s.xinc = -s.xinc;
            s.xnodes += PI;
            s.omgasm -= PI;
        }

        let omegaq = self.omegaq;
        let gsto = self.gsto;
        let xnq = self.xnq;
        let res = match self.resonance.as_mut() {
            Some(res) => res,
            None => return,
        };

        /* the integrator is a cache over |t|: restart from epoch when the
         * requested time flips sign or falls back inside the last
         * integrated interval */
        if res.atime == 0.0
            || (t >= 0.0 && res.atime < 0.0)
            || (t < 0.0 && res.atime >= 0.0)
            || t.abs() < res.atime.abs()
        {
            res.atime = 0.0;
            res.xni = xnq;
            res.xli = res.xlamo;
        }

        let delt = if t >= 0.0 { STEPP } else { STEPN };
        while (t - res.atime).abs() >= STEPP {
            let (xndot, xnddt, xldot) = res.dots(omegaq, omgdot);
            res.xli += xldot * delt + xndot * STEP2;
            res.xni += xndot * delt + xnddt * STEP2;
            res.atime += delt;
        }

        let (xndot, xnddt, xldot) = res.dots(omegaq, omgdot);
        let ft = t - res.atime;
        s.xn = res.xni + xndot * ft + xnddt * ft * ft * 0.5;
        let xl = res.xli + xldot * ft + xndot * ft * ft * 0.5;

        let temp = -s.xnodes + gsto + t * THDT;
        s.xll = match res.kind {
            ResonanceKind::Synchronous { .. } => xl - s.omgasm + temp,
            ResonanceKind::SemiSynchronous { .. } => xl + temp + temp,
        };
    }

    /// Lunar-solar long-period periodics, with the Lyddane modification
    /// below 0.2 rad inclination.
    pub(super) fn apply_periodics(&self, t: f64, sinio: f64, cosio: f64, s: &mut DsState) {
        let (sinis, cosis) = s.xinc.sin_cos();

        /* solar terms */
        let zm = self.zmos + ZNS * t;
        let zf = zm + 2.0 * ZES * zm.sin();
        let sinzf = zf.sin();
        let f2 = 0.5 * sinzf * sinzf - 0.25;
        let f3 = -0.5 * sinzf * zf.cos();
        let ses = self.se2 * f2 + self.se3 * f3;
        let sis = self.si2 * f2 + self.si3 * f3;
        let sls = self.sl2 * f2 + self.sl3 * f3 + self.sl4 * sinzf;
        let sghs = self.sgh2 * f2 + self.sgh3 * f3 + self.sgh4 * sinzf;
        let shs = self.sh2 * f2 + self.sh3 * f3;

        /* lunar terms */
        let zm = self.zmol + ZNL * t;
        let zf = zm + 2.0 * ZEL * zm.sin();
        let sinzf = zf.sin();
        let f2 = 0.5 * sinzf * sinzf - 0.25;
        let f3 = -0.5 * sinzf * zf.cos();
        let sel = self.ee2 * f2 + self.e3 * f3;
        let sil = self.xi2 * f2 + self.xi3 * f3;
        let sll = self.xl2 * f2 + self.xl3 * f3 + self.xl4 * sinzf;
        let sghl = self.xgh2 * f2 + self.xgh3 * f3 + self.xgh4 * sinzf;
        let shl = self.xh2 * f2 + self.xh3 * f3;

        let pe = ses + sel;
        let pinc = sis + sil;
        let pl = sls + sll;
        let mut pgh = sghs + sghl;
        let mut ph = shs + shl;

        s.xinc += pinc;
        s.em += pe;

        if self.xqncl >= 0.2 {
            /* apply periodics directly */
            ph /= sinio;
            pgh -= cosio * ph;
            s.omgasm += pgh;
            s.xnodes += ph;
            s.xll += pl;
        } else {
            /* apply periodics with lyddane modification */
            let (sinok, cosok) = s.xnodes.sin_cos();
            let mut alfdp = sinis * sinok;
            let mut betdp = sinis * cosok;
            let dalf = ph * cosok + pinc * cosis * sinok;
            let dbet = -ph * sinok + pinc * cosis * cosok;
            alfdp += dalf;
            betdp += dbet;

            let mut xls = s.xll + s.omgasm + cosis * s.xnodes;
            let dls = pl + pgh - pinc * s.xnodes * sinis;
            xls += dls;

            s.xnodes = alfdp.atan2(betdp);
            s.xll += pl;
            s.omgasm = xls - s.xll - s.xinc.cos() * s.xnodes;
        }
    }
}

impl Resonance {
    /// Rates of change of mean motion and mean longitude at the current
    /// integrator state.
    fn dots(&self, omegaq: f64, omgdot: f64) -> (f64, f64, f64) {
        let (xndot, xnddt) = match &self.kind {
            ResonanceKind::Synchronous { del1, del2, del3 } => (
                del1 * (self.xli - FASX2).sin()
                    + del2 * (2.0 * (self.xli - FASX4)).sin()
                    + del3 * (3.0 * (self.xli - FASX6)).sin(),
                del1 * (self.xli - FASX2).cos()
                    + 2.0 * del2 * (2.0 * (self.xli - FASX4)).cos()
                    + 3.0 * del3 * (3.0 * (self.xli - FASX6)).cos(),
            ),
            ResonanceKind::SemiSynchronous {
                d2201,
                d2211,
                d3210,
                d3222,
                d4410,
                d4422,
                d5220,
                d5232,
                d5421,
                d5433,
            } => {
                let xomi = omegaq + omgdot * self.atime;
                let x2omi = xomi + xomi;
                let x2li = self.xli + self.xli;
                (
                    d2201 * (x2omi + self.xli - G22).sin()
                        + d2211 * (self.xli - G22).sin()
                        + d3210 * (xomi + self.xli - G32).sin()
                        + d3222 * (-xomi + self.xli - G32).sin()
                        + d4410 * (x2omi + x2li - G44).sin()
                        + d4422 * (x2li - G44).sin()
                        + d5220 * (xomi + self.xli - G52).sin()
                        + d5232 * (-xomi + self.xli - G52).sin()
                        + d5421 * (xomi + x2li - G54).sin()
                        + d5433 * (-xomi + x2li - G54).sin(),
                    d2201 * (x2omi + self.xli - G22).cos()
                        + d2211 * (self.xli - G22).cos()
                        + d3210 * (xomi + self.xli - G32).cos()
                        + d3222 * (-xomi + self.xli - G32).cos()
                        + d5220 * (xomi + self.xli - G52).cos()
                        + d5232 * (-xomi + self.xli - G52).cos()
                        + 2.0
                            * (d4410 * (x2omi + x2li - G44).cos()
                                + d4422 * (x2li - G44).cos()
                                + d5421 * (xomi + x2li - G54).cos()
                                + d5433 * (-xomi + x2li - G54).cos()),
                )
            }
        };

        let xldot = self.xni + self.xfact;
        (xndot, xnddt * xldot, xldot)
    }
}
