//! SGP4/SDP4 orbital propagation.
//!
//! A [`Propagator`] is bound to a single element set with
//! [`Propagator::set_tle`], which recovers the Brouwer mean elements and
//! precomputes every secular and periodic coefficient. Each call to
//! [`Propagator::find_position`] then evaluates the closed-form model at
//! the requested offset from epoch. Orbits with a period of 225 minutes
//! or more use the deep-space (SDP4) branch with lunar/solar and
//! Earth-resonance perturbations; shorter periods use the near-Earth
//! (SGP4) branch.

pub mod consts;
mod deep;
#[cfg(test)]
mod tests;

pub use consts::{Constants, GravityModel};

use crate::coords::{TemeState, Vector3};
use crate::error::{Error, Result};
use crate::time::{fmod2p, TWOPI};
use crate::tle::OrbitalElements;
use consts::TWOTHIRDS;
use deep::{DeepSpace, DeepSpaceContext, DsState};
use log::debug;
use std::f64::consts::PI;

/// Closed-form SGP4/SDP4 propagator bound to one element set.
///
/// The bound state is immutable during propagation with one exception:
/// resonant deep-space orbits advance a small numerical integrator whose
/// state ({atime, xli, xni}) is cached between calls. Clone the
/// propagator to give each thread its own integrator.
#[derive(Debug, Clone)]
pub struct Propagator {
    constants: Constants,
    sat: Option<SatState>,
}

/// Everything derived from the element set at binding time.
#[derive(Debug, Clone)]
struct SatState {
    els: OrbitalElements,

    /* recovered elements */
    xnodp: f64,
    aodp: f64,
    perigee: f64,
    period: f64,

    /* common coefficients */
    angles: AngularCoeffs,
    a3ovk2: f64,
    eta: f64,
    c1: f64,
    c4: f64,
    xmdot: f64,
    omgdot: f64,
    xnodot: f64,
    xnodcf: f64,
    t2cof: f64,

    model: Model,
}

#[derive(Debug, Clone)]
enum Model {
    NearEarth(NearEarth),
    DeepSpace(Box<DeepSpace>),
}

/// Coefficients used only by the near-Earth branch.
#[derive(Debug, Clone)]
struct NearEarth {
    /// Truncated equations for perigee below 220 km.
    simple: bool,
    c5: f64,
    omgcof: f64,
    xmcof: f64,
    delmo: f64,
    sinmo: f64,
    d2: f64,
    d3: f64,
    d4: f64,
    t3cof: f64,
    t4cof: f64,
    t5cof: f64,
}

/// Inclination-dependent coefficients of the final-state computation.
///
/// Computed once at initialization and, for deep-space orbits, once more
/// per propagation from the perturbed inclination.
#[derive(Debug, Clone, Copy)]
struct AngularCoeffs {
    cosio: f64,
    sinio: f64,
    x3thm1: f64,
    x1mth2: f64,
    x7thm1: f64,
    xlcof: f64,
    aycof: f64,
}

impl AngularCoeffs {
    fn new(cosio: f64, sinio: f64, a3ovk2: f64) -> AngularCoeffs {
        let theta2 = cosio * cosio;
        /* avoid the singularity of the retrograde equatorial orbit */
        let xlcof = if (cosio + 1.0).abs() > 1.5e-12 {
            0.125 * a3ovk2 * sinio * (3.0 + 5.0 * cosio) / (1.0 + cosio)
        } else {
            0.125 * a3ovk2 * sinio * (3.0 + 5.0 * cosio) / 1.5e-12
        };
        AngularCoeffs {
            cosio,
            sinio,
            x3thm1: 3.0 * theta2 - 1.0,
            x1mth2: 1.0 - theta2,
            x7thm1: 7.0 * theta2 - 1.0,
            xlcof,
            aycof: 0.25 * a3ovk2 * sinio,
        }
    }
}

/// s4 and qoms24 for a given perigee altitude.
///
/// For perigee below 156 km the values of s and qoms2t are altered;
/// below 98 km the fitting altitude is pinned.
fn drag_constants(perigee: f64, constants: &Constants) -> (f64, f64) {
    let mut s4 = constants.s;
    let mut qoms24 = constants.qoms2t;
    if perigee < 156.0 {
        s4 = if perigee <= 98.0 { 20.0 } else { perigee - 78.0 };
        qoms24 = ((120.0 - s4) * constants.ae / constants.xkmper).powi(4);
        s4 = s4 / constants.xkmper + constants.ae;
    }
    (s4, qoms24)
}

impl Propagator {
    pub fn new(model: GravityModel) -> Propagator {
        Propagator {
            constants: Constants::new(model),
            sat: None,
        }
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Anomalistic period of the bound orbit, minutes.
    pub fn period(&self) -> Option<f64> {
        self.sat.as_ref().map(|s| s.period)
    }

    /// Perigee altitude of the bound orbit, km.
    pub fn perigee(&self) -> Option<f64> {
        self.sat.as_ref().map(|s| s.perigee)
    }

    /// Brouwer original mean motion, radians per minute.
    pub fn recovered_mean_motion(&self) -> Option<f64> {
        self.sat.as_ref().map(|s| s.xnodp)
    }

    /// Brouwer original semi-major axis, Earth radii.
    pub fn recovered_semi_major_axis(&self) -> Option<f64> {
        self.sat.as_ref().map(|s| s.aodp)
    }

    pub fn uses_deep_space(&self) -> Option<bool> {
        self.sat
            .as_ref()
            .map(|s| matches!(s.model, Model::DeepSpace(_)))
    }

    pub fn uses_simple_model(&self) -> Option<bool> {
        self.sat.as_ref().map(|s| match &s.model {
            Model::NearEarth(ne) => ne.simple,
            Model::DeepSpace(_) => false,
        })
    }

    /// Binds an element set, recovering the original mean elements and
    /// precomputing all propagation coefficients.
    ///
    /// On error the propagator is left exactly as it was: the staged
    /// state is committed in a single assignment once every derived
    /// quantity has been computed.
    pub fn set_tle(&mut self, els: &OrbitalElements) -> Result<()> {
        if !(0.0..=0.999).contains(&els.eccentricity) {
            return Err(Error::InvalidTle("eccentricity outside [0, 0.999]"));
        }
        if !(0.0..=PI).contains(&els.inclination) {
            return Err(Error::InvalidTle("inclination outside [0, pi]"));
        }

        let cn = &self.constants;

        /* recover original mean motion (xnodp) and semimajor axis (aodp) */
        let a1 = (cn.xke / els.mean_motion).powf(TWOTHIRDS);
        let cosio = els.inclination.cos();
        let sinio = els.inclination.sin();
        let theta2 = cosio * cosio;
        let x3thm1 = 3.0 * theta2 - 1.0;
        let eosq = els.eccentricity * els.eccentricity;
        let betao2 = 1.0 - eosq;
        let betao = betao2.sqrt();
        let temp = 1.5 * cn.ck2 * x3thm1 / (betao * betao2);
        let del1 = temp / (a1 * a1);
        let a0 = a1 * (1.0 - del1 * (1.0 / 3.0 + del1 * (1.0 + del1 * 134.0 / 81.0)));
        let del0 = temp / (a0 * a0);
        let xnodp = els.mean_motion / (1.0 + del0);
        let aodp = a0 / (1.0 - del0);

        let perigee = (aodp * (1.0 - els.eccentricity) - cn.ae) * cn.xkmper;
        let period = TWOPI / xnodp;
        let use_deep_space = period >= 225.0;

        let (s4, qoms24) = drag_constants(perigee, cn);

        /* generate constants */
        let pinvsq = 1.0 / (aodp * aodp * betao2 * betao2);
        let tsi = 1.0 / (aodp - s4);
        let eta = aodp * els.eccentricity * tsi;
        let etasq = eta * eta;
        let eeta = els.eccentricity * eta;
        let psisq = (1.0 - etasq).abs();
        let coef = qoms24 * tsi.powi(4);
        let coef1 = coef / psisq.powf(3.5);
        let c2 = coef1
            * xnodp
            * (aodp * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.75 * cn.ck2 * tsi / psisq * x3thm1 * (8.0 + 3.0 * etasq * (8.0 + etasq)));
        let c1 = els.bstar * c2;
        let a3ovk2 = -cn.xj3 / cn.ck2 * cn.ae.powi(3);
        let x1mth2 = 1.0 - theta2;
        let c4 = 2.0
            * xnodp
            * coef1
            * aodp
            * betao2
            * (eta * (2.0 + 0.5 * etasq) + els.eccentricity * (0.5 + 2.0 * etasq)
                - 2.0 * cn.ck2 * tsi / (aodp * psisq)
                    * (-3.0 * x3thm1 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75
                            * x1mth2
                            * (2.0 * etasq - eeta * (1.0 + etasq))
                            * (2.0 * els.argument_perigee).cos()));
        let theta4 = theta2 * theta2;
        let temp1 = 3.0 * cn.ck2 * pinvsq * xnodp;
        let temp2 = temp1 * cn.ck2 * pinvsq;
        let temp3 = 1.25 * cn.ck4 * pinvsq * pinvsq * xnodp;
        let xmdot = xnodp
            + 0.5 * temp1 * betao * x3thm1
            + 0.0625 * temp2 * betao * (13.0 - 78.0 * theta2 + 137.0 * theta4);
        let x1m5th = 1.0 - 5.0 * theta2;
        let omgdot = -0.5 * temp1 * x1m5th
            + 0.0625 * temp2 * (7.0 - 114.0 * theta2 + 395.0 * theta4)
            + temp3 * (3.0 - 36.0 * theta2 + 49.0 * theta4);
        let xhdot1 = -temp1 * cosio;
        let xnodot = xhdot1
            + (0.5 * temp2 * (4.0 - 19.0 * theta2) + 2.0 * temp3 * (3.0 - 7.0 * theta2)) * cosio;
        let xnodcf = 3.5 * betao2 * xhdot1 * c1;
        let t2cof = 1.5 * c1;
        let angles = AngularCoeffs::new(cosio, sinio, a3ovk2);

        let model = if use_deep_space {
            debug!(
                "deep-space ephemeris selected (period {:.1} min)",
                period
            );
            let deep = DeepSpace::initialize(&DeepSpaceContext {
                els,
                aodp,
                xnodp,
                eosq,
                betao,
                betao2,
                sinio,
                cosio,
                theta2,
                xmdot,
                omgdot,
                xnodot,
            });
            Model::DeepSpace(Box::new(deep))
        } else {
            /* for perigee less than 220 kilometers the equations are
             * truncated to linear variation in sqrt a and quadratic
             * variation in mean anomaly; the c3, delta omega and delta m
             * terms are dropped */
            let simple = perigee < 220.0;
            if simple {
                debug!("simplified model enabled (perigee {:.1} km)", perigee);
            }

            let c3 = if els.eccentricity > 1.0e-4 {
                coef * tsi * a3ovk2 * xnodp * cn.ae * sinio / els.eccentricity
            } else {
                0.0
            };
            let c5 =
                2.0 * coef1 * aodp * betao2 * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);
            let omgcof = els.bstar * c3 * els.argument_perigee.cos();
            let xmcof = if els.eccentricity > 1.0e-4 {
                -TWOTHIRDS * coef * els.bstar * cn.ae / eeta
            } else {
                0.0
            };
            let delmo = (1.0 + eta * els.mean_anomaly.cos()).powi(3);
            let sinmo = els.mean_anomaly.sin();

            let (d2, d3, d4, t3cof, t4cof, t5cof) = if !simple {
                let c1sq = c1 * c1;
                let d2 = 4.0 * aodp * tsi * c1sq;
                let temp = d2 * tsi * c1 / 3.0;
                let d3 = (17.0 * aodp + s4) * temp;
                let d4 = 0.5 * temp * aodp * tsi * (221.0 * aodp + 31.0 * s4) * c1;
                let t3cof = d2 + 2.0 * c1sq;
                let t4cof = 0.25 * (3.0 * d3 + c1 * (12.0 * d2 + 10.0 * c1sq));
                let t5cof = 0.2
                    * (3.0 * d4
                        + 12.0 * c1 * d3
                        + 6.0 * d2 * d2
                        + 15.0 * c1sq * (2.0 * d2 + c1sq));
                (d2, d3, d4, t3cof, t4cof, t5cof)
            } else {
                (0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
            };

            Model::NearEarth(NearEarth {
                simple,
                c5,
                omgcof,
                xmcof,
                delmo,
                sinmo,
                d2,
                d3,
                d4,
                t3cof,
                t4cof,
                t5cof,
            })
        };

        self.sat = Some(SatState {
            els: *els,
            xnodp,
            aodp,
            perigee,
            period,
            angles,
            a3ovk2,
            eta,
            c1,
            c4,
            xmdot,
            omgdot,
            xnodot,
            xnodcf,
            t2cof,
            model,
        });
        Ok(())
    }

    /// Propagates to `tsince` minutes after epoch and returns the TEME
    /// state vector.
    pub fn find_position(&mut self, tsince: f64) -> Result<TemeState> {
        let sat = self
            .sat
            .as_mut()
            .ok_or(Error::InvalidTle("no element set bound"))?;
        let cn = &self.constants;
        let els = &sat.els;

        /* update for secular gravity and atmospheric drag */
        let xmdf = els.mean_anomaly + sat.xmdot * tsince;
        let omgadf = els.argument_perigee + sat.omgdot * tsince;
        let xnoddf = els.ascending_node + sat.xnodot * tsince;
        let tsq = tsince * tsince;
        let xnode = xnoddf + sat.xnodcf * tsq;
        let mut tempa = 1.0 - sat.c1 * tsince;
        let mut tempe = els.bstar * sat.c4 * tsince;
        let mut templ = sat.t2cof * tsq;

        match &mut sat.model {
            Model::NearEarth(ne) => {
                let mut xmp = xmdf;
                let mut omega = omgadf;
                if !ne.simple {
                    let delomg = ne.omgcof * tsince;
                    let delm = ne.xmcof * ((1.0 + sat.eta * xmdf.cos()).powi(3) - ne.delmo);
                    let temp = delomg + delm;
                    xmp = xmdf + temp;
                    omega = omgadf - temp;
                    let tcube = tsq * tsince;
                    let tfour = tsince * tcube;
                    tempa = tempa - ne.d2 * tsq - ne.d3 * tcube - ne.d4 * tfour;
                    tempe += els.bstar * ne.c5 * (xmp.sin() - ne.sinmo);
                    templ += ne.t3cof * tcube + tfour * (ne.t4cof + tsince * ne.t5cof);
                }

                let a = sat.aodp * tempa * tempa;
                let e = els.eccentricity - tempe;
                let xl = xmp + omega + xnode + sat.xnodp * templ;

                final_position_velocity(cn, e, a, omega, xl, xnode, els.inclination, &sat.angles)
            }
            Model::DeepSpace(ds) => {
                let mut state = DsState {
                    xll: xmdf,
                    omgasm: omgadf,
                    xnodes: xnode,
                    em: els.eccentricity,
                    xinc: els.inclination,
                    xn: sat.xnodp,
                };
                ds.secular(tsince, sat.omgdot, &mut state);

                let a = (cn.xke / state.xn).powf(TWOTHIRDS) * tempa * tempa;
                state.em -= tempe;
                state.xll += sat.xnodp * templ;

                ds.apply_periodics(tsince, sat.angles.sinio, sat.angles.cosio, &mut state);

                let xl = state.xll + state.omgasm + state.xnodes;
                let perturbed =
                    AngularCoeffs::new(state.xinc.cos(), state.xinc.sin(), sat.a3ovk2);

                final_position_velocity(
                    cn,
                    state.em,
                    a,
                    state.omgasm,
                    xl,
                    state.xnodes,
                    state.xinc,
                    &perturbed,
                )
            }
        }
    }
}

impl Default for Propagator {
    fn default() -> Propagator {
        Propagator::new(GravityModel::default())
    }
}

struct KeplerSolution {
    #[cfg_attr(not(test), allow(dead_code))]
    epw: f64,
    sinepw: f64,
    cosepw: f64,
    ecose: f64,
    esine: f64,
}

/// Solves Kepler's equation in the (axn, ayn, capu) formulation.
///
/// Newton-Raphson with a second-order correction from the second
/// iteration on. The first step is clamped so a bad seed near e = 1
/// cannot throw the iteration out of the convergence basin. Up to ten
/// iterations; non-convergence is tolerated silently and the last
/// evaluation is used.
fn solve_kepler(capu: f64, axn: f64, ayn: f64) -> KeplerSolution {
    let elsq = axn * axn + ayn * ayn;
    let max_newton = 1.25 * elsq.sqrt();

    let mut epw = capu;
    let mut sinepw = 0.0;
    let mut cosepw = 0.0;
    let mut ecose = 0.0;
    let mut esine = 0.0;
    let mut delta_epw = 0.0;

    for i in 0..10 {
        sinepw = epw.sin();
        cosepw = epw.cos();
        ecose = axn * cosepw + ayn * sinepw;
        esine = axn * sinepw - ayn * cosepw;

        let f = capu - epw + esine;
        if f.abs() < 1.0e-12 {
            break;
        }

        let fdot = 1.0 - ecose;
        delta_epw = if i == 0 {
            (f / fdot).clamp(-max_newton, max_newton)
        } else {
            f / (fdot + 0.5 * esine * delta_epw)
        };
        epw += delta_epw;
    }

    KeplerSolution {
        epw,
        sinepw,
        cosepw,
        ecose,
        esine,
    }
}

/// Shared tail of both branches: long-period periodics, Kepler solution,
/// short-period corrections and the TEME state vector.
#[allow(clippy::too_many_arguments)]
fn final_position_velocity(
    cn: &Constants,
    e: f64,
    a: f64,
    omega: f64,
    xl: f64,
    xnode: f64,
    xincl: f64,
    angles: &AngularCoeffs,
) -> Result<TemeState> {
    if a < 1.0 {
        return Err(Error::DecayedOrbit("semi-major axis below Earth surface"));
    }
    if e < -1.0e-3 {
        return Err(Error::DecayedOrbit("drag drove eccentricity negative"));
    }
    if e >= 1.0 {
        return Err(Error::HyperbolicState);
    }

    let beta = (1.0 - e * e).sqrt();
    let xn = cn.xke / a.powf(1.5);

    /* long period periodics */
    let axn = e * omega.cos();
    let temp = 1.0 / (a * beta * beta);
    let xll = temp * angles.xlcof * axn;
    let aynl = temp * angles.aycof;
    let xlt = xl + xll;
    let ayn = e * omega.sin() + aynl;
    let elsq = axn * axn + ayn * ayn;
    if elsq >= 1.0 {
        return Err(Error::HyperbolicState);
    }

    /* solve keplers equation */
    let capu = fmod2p(xlt - xnode);
    let kep = solve_kepler(capu, axn, ayn);

    /* short period preliminary quantities */
    let temp = 1.0 - elsq;
    let pl = a * temp;
    let r = a * (1.0 - kep.ecose);
    let temp1 = 1.0 / r;
    let rdot = cn.xke * a.sqrt() * kep.esine * temp1;
    let rfdot = cn.xke * pl.sqrt() * temp1;
    let temp2 = a * temp1;
    let betal = temp.sqrt();
    let temp3 = 1.0 / (1.0 + betal);
    let cosu = temp2 * (kep.cosepw - axn + ayn * kep.esine * temp3);
    let sinu = temp2 * (kep.sinepw - ayn - axn * kep.esine * temp3);
    let u = sinu.atan2(cosu);
    let sin2u = 2.0 * sinu * cosu;
    let cos2u = 2.0 * cosu * cosu - 1.0;
    let temp = 1.0 / pl;
    let temp1 = cn.ck2 * temp;
    let temp2 = temp1 * temp;

    /* update for short periodics */
    let rk =
        r * (1.0 - 1.5 * temp2 * betal * angles.x3thm1) + 0.5 * temp1 * angles.x1mth2 * cos2u;
    let uk = u - 0.25 * temp2 * angles.x7thm1 * sin2u;
    let xnodek = xnode + 1.5 * temp2 * angles.cosio * sin2u;
    let xinck = xincl + 1.5 * temp2 * angles.cosio * angles.sinio * cos2u;
    let rdotk = rdot - xn * temp1 * angles.x1mth2 * sin2u;
    let rfdotk = rfdot + xn * temp1 * (angles.x1mth2 * cos2u + 1.5 * angles.x3thm1);

    if rk < 0.0 {
        return Err(Error::DecayedOrbit("negative radial distance"));
    }

    /* orientation vectors */
    let (sinuk, cosuk) = uk.sin_cos();
    let (sinik, cosik) = xinck.sin_cos();
    let (sinnok, cosnok) = xnodek.sin_cos();
    let xmx = -sinnok * cosik;
    let xmy = cosnok * cosik;
    let ux = xmx * sinuk + cosnok * cosuk;
    let uy = xmy * sinuk + sinnok * cosuk;
    let uz = sinik * sinuk;
    let vx = xmx * cosuk - cosnok * sinuk;
    let vy = xmy * cosuk - sinnok * sinuk;
    let vz = sinik * cosuk;

    /* position in km, velocity in km/s */
    Ok(TemeState {
        position: Vector3::new(
            rk * ux * cn.xkmper,
            rk * uy * cn.xkmper,
            rk * uz * cn.xkmper,
        ),
        velocity: Vector3::new(
            (rdotk * ux + rfdotk * vx) * cn.xkmper / 60.0,
            (rdotk * uy + rfdotk * vy) * cn.xkmper / 60.0,
            (rdotk * uz + rfdotk * vz) * cn.xkmper / 60.0,
        ),
    })
}
