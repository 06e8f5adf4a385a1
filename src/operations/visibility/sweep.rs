//! The advance / retard / scan sweep over a [`CanonicalSequence`].
//!
//! The three procedures of Joe and Simpson hand control to each other
//! through [`Step`]; [`Sweep::run`] drives them in a loop until the last
//! vertex of the sequence has been consumed. The index only moves forward,
//! and every vertex is pushed at most once, so the sweep is linear.

use std::f64::consts::TAU;

use tracing::trace;

use super::preprocess::{CanonicalSequence, VertexDisplacement};
use crate::error::{OperationError, Result};
use crate::geometry::{LineSegment, Ray2};
use crate::math::{
    eps_eq, eps_ge, eps_gt, eps_le, eps_lt, orientation, points_eq, Orientation, PolarPoint,
};

/// Direction in which `scan` looks for the boundary to re-emerge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanDirection {
    Clockwise,
    CounterClockwise,
}

/// Next procedure to run. Indices name the vertex the procedure starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Advance(usize),
    Retard(usize),
    Scan {
        from: usize,
        window_end: Option<VertexDisplacement>,
        direction: ScanDirection,
    },
    Done,
}

/// Visible boundary found so far. The bottom entry is always `v0`.
#[derive(Debug, Clone)]
pub(crate) struct BoundaryStack {
    entries: Vec<VertexDisplacement>,
}

impl BoundaryStack {
    pub fn new(v0: VertexDisplacement) -> Self {
        Self { entries: vec![v0] }
    }

    pub fn push(&mut self, entry: VertexDisplacement) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<VertexDisplacement> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<&VertexDisplacement> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries from bottom (`v0`) to top.
    pub fn into_vec(self) -> Vec<VertexDisplacement> {
        self.entries
    }
}

/// One run of the sweep over a sequence.
pub(crate) struct Sweep<'a> {
    v: &'a [VertexDisplacement],
    stack: BoundaryStack,
}

impl<'a> Sweep<'a> {
    /// Prepares a sweep with `v0` already on the stack.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the sequence has fewer than
    /// two entries.
    pub fn new(sequence: &'a CanonicalSequence) -> Result<Self> {
        if sequence.len() < 2 {
            return Err(OperationError::InvalidInput(format!(
                "sweep needs at least 2 boundary vertices, got {}",
                sequence.len()
            ))
            .into());
        }
        let v = sequence.entries();
        Ok(Self {
            v,
            stack: BoundaryStack::new(v[0]),
        })
    }

    /// Runs the sweep to completion and returns the boundary, bottom first.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` when the sequence does not behave
    /// like the boundary of a simple polygon seen from an inside point: the
    /// stack runs empty while retarding, or a window crossing the algorithm
    /// relies on does not exist.
    pub fn run(self) -> Result<Vec<VertexDisplacement>> {
        self.run_observed(|_| {})
    }

    /// [`Sweep::run`], handing every step to `observe` before it executes.
    fn run_observed(
        mut self,
        mut observe: impl FnMut(&Step),
    ) -> Result<Vec<VertexDisplacement>> {
        let mut step = if eps_ge(self.v[1].alpha, self.v[0].alpha) {
            Step::Advance(0)
        } else {
            Step::Scan {
                from: 0,
                window_end: None,
                direction: ScanDirection::Clockwise,
            }
        };

        loop {
            trace!(?step, stack = self.stack.len(), "sweep step");
            observe(&step);
            step = match step {
                Step::Advance(i) => self.advance(i)?,
                Step::Retard(i) => self.retard(i)?,
                Step::Scan {
                    from,
                    window_end,
                    direction,
                } => self.scan(from, window_end, direction)?,
                Step::Done => break,
            };
        }

        Ok(self.stack.into_vec())
    }

    fn last(&self) -> usize {
        self.v.len() - 1
    }

    fn top(&self) -> Result<VertexDisplacement> {
        self.stack.top().copied().ok_or_else(exhausted)
    }

    /// Turn `v[a] -> v[b] -> v[c]`.
    fn turn(&self, a: usize, b: usize, c: usize) -> Orientation {
        orientation(
            &self.v[a].cartesian(),
            &self.v[b].cartesian(),
            &self.v[c].cartesian(),
        )
    }

    /// Accepts `v[i + 1]` while it stays within one turn of `v0`.
    fn advance(&mut self, iprev: usize) -> Result<Step> {
        let v = self.v;
        let i = iprev + 1;

        if eps_le(v[i].alpha, TAU) {
            self.stack.push(v[i]);
            if i == self.last() {
                return Ok(Step::Done);
            }

            if eps_lt(v[i + 1].alpha, v[i].alpha) {
                match self.turn(i - 1, i, i + 1) {
                    Orientation::Clockwise => {
                        return Ok(Step::Scan {
                            from: i,
                            window_end: None,
                            direction: ScanDirection::Clockwise,
                        })
                    }
                    Orientation::CounterClockwise => return Ok(Step::Retard(i)),
                    Orientation::Collinear => {}
                }
            }
            return Ok(Step::Advance(i));
        }

        // The boundary wraps past a full turn: close the visible region at
        // the ray through v0 and look for the boundary to come back.
        let v0 = v[0];
        if self.top()?.alpha < TAU {
            let crossing = LineSegment::new(v[iprev].cartesian(), v[i].cartesian())
                .ray_intersection(&Ray2::from_origin(v0.point.theta))
                .ok_or_else(|| {
                    missing_crossing("edge past a full turn does not meet the ray through v0")
                })?;
            self.stack.push(displacement_between(
                PolarPoint::from_cartesian(&crossing),
                &v[iprev],
                &v[i],
            ));
        }

        Ok(Step::Scan {
            from: iprev,
            window_end: Some(v0),
            direction: ScanDirection::CounterClockwise,
        })
    }

    /// Pops stack entries hidden by the edge `v[i] -> v[i + 1]`.
    fn retard(&mut self, iprev: usize) -> Result<Step> {
        let v = self.v;
        let i = iprev + 1;
        let sj_next = self.locate_sj(&v[iprev], &v[i])?;
        let sj = self.top()?;

        if sj.alpha < v[i].alpha {
            let crossing = LineSegment::new(sj.cartesian(), sj_next.cartesian())
                .ray_intersection(&Ray2::from_origin(v[i].point.theta));
            if let Some(crossing) = crossing {
                self.stack.push(displacement_between(
                    PolarPoint::from_cartesian(&crossing),
                    &sj,
                    &sj_next,
                ));
            }
            self.stack.push(v[i]);

            if i == self.last() {
                return Ok(Step::Done);
            }

            let turn = self.turn(i - 1, i, i + 1);
            if eps_ge(v[i + 1].alpha, v[i].alpha) && turn == Orientation::Clockwise {
                return Ok(Step::Advance(i));
            }
            self.stack.pop();
            if eps_gt(v[i + 1].alpha, v[i].alpha) && turn == Orientation::CounterClockwise {
                return Ok(Step::Scan {
                    from: i,
                    window_end: Some(v[i]),
                    direction: ScanDirection::CounterClockwise,
                });
            }
            return Ok(Step::Retard(i));
        }

        let resumes_forward = eps_eq(v[i].alpha, sj.alpha)
            && v.get(i + 1).is_some_and(|next| eps_gt(next.alpha, v[i].alpha))
            && self.turn(iprev, i, i + 1) == Orientation::Clockwise;
        if resumes_forward {
            self.stack.push(v[i]);
            return Ok(Step::Advance(i));
        }

        let window_end = intersect_with_window(&v[iprev], &v[i], &sj, Some(&sj_next))
            .ok_or_else(|| missing_crossing("retarding edge does not meet the popped window"))?;
        Ok(Step::Scan {
            from: iprev,
            window_end: Some(window_end),
            direction: ScanDirection::Clockwise,
        })
    }

    /// Skips vertices until an edge crosses back over the current window.
    fn scan(
        &mut self,
        iprev: usize,
        window_end: Option<VertexDisplacement>,
        direction: ScanDirection,
    ) -> Result<Step> {
        let v = self.v;
        let i = iprev + 1;
        if i >= self.last() {
            return Ok(Step::Done);
        }

        let top = self.top()?;
        let keep_scanning = Step::Scan {
            from: i,
            window_end,
            direction,
        };

        match direction {
            ScanDirection::Clockwise
                if eps_gt(v[i + 1].alpha, top.alpha) && eps_ge(top.alpha, v[i].alpha) =>
            {
                let crossing = intersect_with_window(&v[i], &v[i + 1], &top, window_end.as_ref());
                match crossing {
                    Some(crossing)
                        if !window_end
                            .is_some_and(|end| points_eq(&crossing.cartesian(), &end.cartesian())) =>
                    {
                        self.stack.push(crossing);
                        Ok(Step::Advance(i))
                    }
                    _ => Ok(keep_scanning),
                }
            }
            ScanDirection::CounterClockwise
                if eps_le(v[i + 1].alpha, top.alpha) && top.alpha < v[i].alpha =>
            {
                if intersect_with_window(&v[i], &v[i + 1], &top, window_end.as_ref()).is_some() {
                    Ok(Step::Retard(i))
                } else {
                    Ok(keep_scanning)
                }
            }
            _ => Ok(keep_scanning),
        }
    }

    /// Pops the stack down to the entry `s_j` whose window the edge
    /// `vi -> vi1` falls into. `s_j` is left on top; the last popped entry
    /// `s_{j+1}` is returned.
    fn locate_sj(
        &mut self,
        vi: &VertexDisplacement,
        vi1: &VertexDisplacement,
    ) -> Result<VertexDisplacement> {
        let mut sj_next = self.stack.pop().ok_or_else(exhausted)?;
        loop {
            let sj = self.top()?;

            if eps_lt(sj.alpha, vi1.alpha) && eps_le(vi1.alpha, sj_next.alpha) {
                return Ok(sj_next);
            }

            if eps_le(vi1.alpha, sj.alpha) && eps_le(sj.alpha, sj_next.alpha) {
                let (sj_c, sj_next_c) = (sj.cartesian(), sj_next.cartesian());
                let crosses = LineSegment::new(vi.cartesian(), vi1.cartesian())
                    .intersection(&LineSegment::new(sj_c, sj_next_c))
                    .is_some_and(|y| !points_eq(&y, &sj_c) && !points_eq(&y, &sj_next_c));
                if crosses {
                    return Ok(sj_next);
                }
            }

            sj_next = self.stack.pop().ok_or_else(exhausted)?;
        }
    }
}

/// Crossing of the edge `a -> b` with the window starting at `orig`.
///
/// The window is the segment `orig -> end`, or without an end the ray from
/// `orig` at angle `orig.alpha`.
fn intersect_with_window(
    a: &VertexDisplacement,
    b: &VertexDisplacement,
    orig: &VertexDisplacement,
    end: Option<&VertexDisplacement>,
) -> Option<VertexDisplacement> {
    let edge = LineSegment::new(a.cartesian(), b.cartesian());
    let crossing = match end {
        Some(end) => edge.intersection(&LineSegment::new(orig.cartesian(), end.cartesian())),
        None => edge.ray_intersection(&Ray2::new(orig.cartesian(), orig.alpha)),
    }?;
    Some(displacement_between(PolarPoint::from_cartesian(&crossing), a, b))
}

/// Gives a point on the edge `v1 -> v2` the displacement matching its
/// angle, shifted by whole turns into the edge's displacement range.
fn displacement_between(
    s: PolarPoint,
    v1: &VertexDisplacement,
    v2: &VertexDisplacement,
) -> VertexDisplacement {
    let bot = v1.alpha.min(v2.alpha);
    let top = v1.alpha.max(v2.alpha);
    if eps_eq(bot, top) {
        return VertexDisplacement::new(s, bot);
    }

    let mut alpha = s.theta;
    while eps_gt(alpha, top) {
        alpha -= TAU;
    }
    while eps_lt(alpha, bot) {
        alpha += TAU;
    }
    VertexDisplacement::new(s, alpha)
}

fn exhausted() -> crate::error::VisipolError {
    OperationError::Failed("boundary stack exhausted while retarding".to_owned()).into()
}

fn missing_crossing(context: &str) -> crate::error::VisipolError {
    OperationError::Failed(format!("missing window crossing: {context}")).into()
}
