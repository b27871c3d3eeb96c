// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag autoscroll state.
//!
//! Autoscroll has no timer of its own. The host calls
//! [`RichTextEditor::tick`](crate::RichTextEditor::tick) with the time elapsed
//! since the previous call, and [`Autoscroll::advance`] turns that into a
//! number of whole periods to run.

use core::time::Duration;

/// Which way the viewport scrolls while the pointer is dragged outside it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AutoscrollDirection {
    /// Not scrolling.
    #[default]
    Idle,
    /// The pointer is above the viewport.
    Up,
    /// The pointer is below the viewport.
    Down,
}

/// How far per tick the viewport scrolls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AutoscrollSpeed {
    /// The pointer is just outside the viewport.
    #[default]
    Slow,
    /// The pointer is far outside the viewport.
    Fast,
}

/// Autoscroll state: direction, speed, and time accumulated towards the next tick.
#[derive(Clone, Debug)]
pub struct Autoscroll {
    direction: AutoscrollDirection,
    speed: AutoscrollSpeed,
    pointer_x: f64,
    elapsed: Duration,
    period: Duration,
}

impl Autoscroll {
    /// Creates an idle autoscroll that ticks every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            direction: AutoscrollDirection::Idle,
            speed: AutoscrollSpeed::Slow,
            pointer_x: 0.0,
            elapsed: Duration::ZERO,
            period,
        }
    }

    /// Starts or updates autoscrolling.
    ///
    /// Updating an already active autoscroll keeps the time accumulated
    /// towards the next tick.
    pub fn arm(&mut self, direction: AutoscrollDirection, speed: AutoscrollSpeed, pointer_x: f64) {
        if direction == AutoscrollDirection::Idle {
            self.cancel();
            return;
        }
        if self.direction != direction || self.speed != speed {
            tracing::debug!(?direction, ?speed, "autoscroll armed");
        }
        if !self.is_active() {
            self.elapsed = Duration::ZERO;
        }
        self.direction = direction;
        self.speed = speed;
        self.pointer_x = pointer_x;
    }

    /// Stops autoscrolling and discards accumulated time.
    pub fn cancel(&mut self) {
        if self.is_active() {
            tracing::debug!("autoscroll cancelled");
        }
        self.direction = AutoscrollDirection::Idle;
        self.elapsed = Duration::ZERO;
    }

    /// Returns `true` while the pointer is dragged outside the viewport.
    pub fn is_active(&self) -> bool {
        self.direction != AutoscrollDirection::Idle
    }

    /// The current direction.
    pub fn direction(&self) -> AutoscrollDirection {
        self.direction
    }

    /// The current speed.
    pub fn speed(&self) -> AutoscrollSpeed {
        self.speed
    }

    /// Horizontal pointer position, in viewport coordinates, at the last drag.
    pub fn pointer_x(&self) -> f64 {
        self.pointer_x
    }

    /// The tick interval.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sets the tick interval.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    /// Accumulates `dt` and returns the number of ticks that are due.
    ///
    /// Always zero while idle. A zero period yields one tick per call.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.is_active() {
            return 0;
        }
        if self.period.is_zero() {
            return 1;
        }
        self.elapsed += dt;
        let mut ticks = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            ticks += 1;
        }
        ticks
    }
}
