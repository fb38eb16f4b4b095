//! Player: Cancellable, timer-sequenced playback of a letter script.
//!
//! The player owns the surface and a session with two timers: the type
//! timer (next op) and the settle timer (cursor after completion). It never
//! sleeps. Callers ask for [`Player::next_deadline`] and call
//! [`Player::poll`] once it has passed, either from their own event loop or
//! through [`PlayerActor`](crate::actor::PlayerActor).
//!
//! ```text
//!   Idle ──run──▶ Running ──script exhausted──▶ Completing ──settle──▶ Settled
//!                   ▲  │                             │                  │
//!                   └──┴───────── run (preempt) ◀────┴──────────────────┘
//! ```

mod cursor;

pub use cursor::{Cursor, CursorFlags};

use crate::config::TypistConfig;
use crate::diff::{build_script, diff, LetterOp, OpKind};
use crate::error::{Result, SurfaceError, TypistError};
use crate::humanize::humanize;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Where the player is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing has run yet, or the last run was aborted.
    Idle,
    /// Ops are firing.
    Running,
    /// Script exhausted, waiting for the settle delay.
    Completing,
    /// Cursor is in its terminal state.
    Settled,
}

/// What a call to [`Player::poll`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// Ops applied to the surface.
    pub applied: usize,
    /// The script ran out during this poll.
    pub completed: bool,
    /// The cursor settled during this poll.
    pub settled: bool,
}

/// Per-run playback state.
#[derive(Debug, Default)]
struct Session {
    /// Humanized script of the current run.
    script: Vec<LetterOp>,
    /// Index of the next op to apply.
    next_op: usize,
    /// When the next op fires.
    type_due: Option<Instant>,
    /// When the cursor settles.
    settle_due: Option<Instant>,
    /// Layout space has not been reserved yet in this run.
    reserve_pending: bool,
}

/// Drives typing animations on a surface.
pub struct Player<S, R = StdRng> {
    /// The live display.
    surface: S,
    /// Timing and humanizer settings.
    config: TypistConfig,
    /// Caret state.
    cursor: Cursor,
    /// Random source for typo injection.
    rng: R,
    /// Current run.
    session: Session,
    /// Lifecycle phase.
    phase: Phase,
}

impl<S: Surface> Player<S> {
    /// Create a player with an entropy-seeded random source.
    pub fn new(surface: S, config: TypistConfig) -> Result<Self> {
        Self::with_rng(surface, config, StdRng::from_entropy())
    }
}

impl<S: Surface, R: Rng> Player<S, R> {
    /// Create a player with an explicit random source.
    pub fn with_rng(surface: S, config: TypistConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            surface,
            cursor: Cursor::new(config.stay),
            config,
            rng,
            session: Session::default(),
            phase: Phase::Idle,
        })
    }

    /// Start typing towards the surface's target, preempting any run in
    /// flight.
    ///
    /// Text already applied by a preempted run stays on the surface; the
    /// new diff starts from it.
    pub fn run(&mut self, now: Instant) -> Result<()> {
        let preempted = matches!(self.phase, Phase::Running | Phase::Completing);
        self.kill_run_operations();
        debug!(preempted, "typing run requested");

        self.cursor.begin_typing();
        if let Err(err) = self.surface.cursor_changed(self.cursor) {
            return Err(self.abort(err));
        }

        let target = self.surface.target_nodes();
        if target.is_empty() {
            self.session = Session::default();
            self.complete(now);
            return Ok(());
        }

        let current = self.surface.current_nodes();
        let difference = diff(&current, &target);
        let mut script = build_script(&difference);
        let bursts = humanize(&mut script, &self.config.humanize, &mut self.rng);
        debug!(
            deletes = difference.delete_nodes.len(),
            adds = difference.add_nodes.len(),
            partial = difference.partial_edit.is_some(),
            ops = script.len(),
            bursts = bursts.len(),
            "script ready"
        );

        let lead_in = self.config.scale(self.config.lead_in);
        self.session = Session {
            script,
            next_op: 0,
            type_due: Some(now + lead_in),
            settle_due: None,
            reserve_pending: true,
        };
        self.phase = Phase::Running;
        Ok(())
    }

    /// Fire every timer that is due at `now`, in order.
    ///
    /// A surface error aborts the run: both timers are cancelled and the
    /// player returns to [`Phase::Idle`].
    pub fn poll(&mut self, now: Instant) -> Result<PollOutcome> {
        let mut outcome = PollOutcome::default();

        loop {
            if let Some(due) = self.session.type_due.filter(|due| *due <= now) {
                self.session.type_due = None;
                match self.fire_type_timer(due) {
                    Ok(true) => outcome.applied += 1,
                    Ok(false) => outcome.completed = true,
                    Err(err) => return Err(self.abort(err)),
                }
            } else if self.session.settle_due.is_some_and(|due| due <= now) {
                self.session.settle_due = None;
                self.cursor.settle();
                self.phase = Phase::Settled;
                outcome.settled = true;
                debug!(cursor = ?self.cursor.flags(), "cursor settled");
                if let Err(err) = self.surface.cursor_changed(self.cursor) {
                    return Err(self.abort(err));
                }
            } else {
                break;
            }
        }

        Ok(outcome)
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.session.type_due, self.session.settle_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Current caret state.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Mutable caret state, e.g. to toggle `stay`.
    pub const fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a run is in flight (typing or waiting to settle).
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Completing)
    }

    /// Ops applied so far in the current run.
    pub const fn applied(&self) -> usize {
        self.session.next_op
    }

    /// The humanized script of the current run.
    pub fn script(&self) -> &[LetterOp] {
        &self.session.script
    }

    /// The surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface, mutably.
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Configuration.
    pub const fn config(&self) -> &TypistConfig {
        &self.config
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Clear both timers.
    fn kill_run_operations(&mut self) {
        self.session.type_due = None;
        self.session.settle_due = None;
    }

    fn complete(&mut self, at: Instant) {
        self.session.type_due = None;
        self.session.settle_due = Some(at + self.config.settle_delay);
        self.phase = Phase::Completing;
        debug!(ops = self.session.script.len(), "typing run complete");
    }

    fn abort(&mut self, err: SurfaceError) -> TypistError {
        warn!(error = %err, applied = self.session.next_op, "surface error aborted typing run");
        self.kill_run_operations();
        self.phase = Phase::Idle;
        err.into()
    }

    /// Apply the next op and schedule the one after it.
    ///
    /// Returns `false` once the script is exhausted.
    fn fire_type_timer(&mut self, due: Instant) -> std::result::Result<bool, SurfaceError> {
        let Some(op) = self.session.script.get(self.session.next_op).cloned() else {
            self.complete(due);
            return Ok(false);
        };
        self.session.next_op += 1;
        self.apply(&op)?;
        trace!(index = self.session.next_op - 1, kind = ?op.kind, node = %op.target.id, "op applied");

        self.session.type_due = Some(due + self.config.scaled(op.delay_ms));
        Ok(true)
    }

    fn apply(&mut self, op: &LetterOp) -> std::result::Result<(), SurfaceError> {
        let id = op.target.id;
        match op.kind {
            OpKind::Backspace => {
                let mut text = self.surface.text(id)?;
                text.pop();
                if text.is_empty() {
                    self.surface.clear_text(id)?;
                } else {
                    self.surface.set_text(id, &text)?;
                }
            }
            OpKind::Type(ch) => {
                self.surface.attach(&op.target)?;
                self.reserve_once()?;
                let mut text = self.surface.text(id)?;
                text.push(ch);
                self.surface.set_text(id, &text)?;
            }
            OpKind::Blank if op.detaches => {}
            OpKind::Blank => {
                self.surface.attach(&op.target)?;
                self.reserve_once()?;
            }
        }

        if op.detaches {
            self.surface.detach(id)?;
        }
        Ok(())
    }

    fn reserve_once(&mut self) -> std::result::Result<(), SurfaceError> {
        if self.session.reserve_pending {
            self.session.reserve_pending = false;
            self.surface.reserve_layout_space()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypoConfig;
    use crate::node::NodeSpec;
    use crate::surface::MemorySurface;
    use std::time::Duration;

    fn steady_config() -> TypistConfig {
        let mut config = TypistConfig::default();
        config.humanize.typo = TypoConfig::disabled();
        config
    }

    fn player(target: Vec<NodeSpec>, config: TypistConfig) -> Player<MemorySurface, StdRng> {
        Player::with_rng(
            MemorySurface::with_target(target),
            config,
            StdRng::seed_from_u64(11),
        )
        .unwrap()
    }

    /// Fire timers until none are left, returning the last deadline seen.
    fn drain<R: Rng>(player: &mut Player<MemorySurface, R>) -> Option<Instant> {
        let mut last = None;
        while let Some(deadline) = player.next_deadline() {
            player.poll(deadline).unwrap();
            last = Some(deadline);
        }
        last
    }

    #[test]
    fn test_full_run_types_target() {
        let mut player = player(
            vec![NodeSpec::text("Hello, "), NodeSpec::element("b", "world")],
            steady_config(),
        );
        player.run(Instant::now()).unwrap();
        assert_eq!(player.phase(), Phase::Running);
        assert_eq!(player.script().len(), 12);

        drain(&mut player);

        assert_eq!(player.surface().visible_text(), "Hello, world");
        assert_eq!(player.surface().nodes().len(), 2);
        assert_eq!(player.surface().reservations(), 1);
        assert_eq!(player.phase(), Phase::Settled);
    }

    #[test]
    fn test_typos_still_reach_target() {
        let mut config = TypistConfig::default();
        config.humanize.typo.probability = 0.3;

        for seed in 0..8 {
            let mut player = Player::with_rng(
                MemorySurface::with_target(vec![NodeSpec::text(
                    "A longer sentence gives the typo pass plenty of room to misbehave.",
                )]),
                config.clone(),
                StdRng::seed_from_u64(seed),
            )
            .unwrap();
            player.run(Instant::now()).unwrap();
            drain(&mut player);
            assert_eq!(
                player.surface().visible_text(),
                "A longer sentence gives the typo pass plenty of room to misbehave."
            );
        }
    }

    #[test]
    fn test_first_op_waits_for_lead_in() {
        let mut player = player(vec![NodeSpec::text("abc")], steady_config());
        let start = Instant::now();
        player.run(start).unwrap();

        assert_eq!(player.next_deadline(), Some(start + Duration::from_millis(150)));
        let outcome = player.poll(start + Duration::from_millis(149)).unwrap();
        assert_eq!(outcome.applied, 0);
        assert_eq!(player.surface().visible_text(), "");
    }

    #[test]
    fn test_cancellation_preempts_previous_script() {
        let mut player = player(vec![NodeSpec::text("abcdefghij")], steady_config());
        let start = Instant::now();
        player.run(start).unwrap();
        assert_eq!(player.script().len(), 10);

        while player.applied() < 2 {
            let deadline = player.next_deadline().unwrap();
            player.poll(deadline).unwrap();
        }
        assert_eq!(player.applied(), 2);
        assert_eq!(player.surface().visible_text(), "ab");

        player.surface_mut().set_target(vec![NodeSpec::text("xyz")]);
        let restart = start + Duration::from_millis(200);
        player.run(restart).unwrap();

        // Two backspaces over "ab", then "xyz".
        assert_eq!(player.applied(), 0);
        assert_eq!(player.script().len(), 5);
        assert_eq!(player.poll(restart).unwrap().applied, 0);
        assert_eq!(player.surface().visible_text(), "ab");

        while let Some(deadline) = player.next_deadline() {
            player.poll(deadline).unwrap();
            assert!(!player.surface().visible_text().contains('c'));
        }
        assert_eq!(player.surface().visible_text(), "xyz");
    }

    #[test]
    fn test_restart_cancels_pending_settle() {
        let mut player = player(vec![NodeSpec::text("one")], steady_config());
        let start = Instant::now();
        player.run(start).unwrap();
        while player.phase() == Phase::Running {
            let deadline = player.next_deadline().unwrap();
            player.poll(deadline).unwrap();
        }
        assert_eq!(player.phase(), Phase::Completing);

        player.surface_mut().set_target(vec![NodeSpec::text("one two")]);
        player.run(start + Duration::from_secs(1)).unwrap();
        assert_eq!(player.phase(), Phase::Running);
        assert!(!player.cursor().hidden());

        drain(&mut player);
        assert_eq!(player.surface().visible_text(), "one two");
    }

    #[test]
    fn test_settle_hides_cursor() {
        let mut player = player(vec![NodeSpec::text("hi")], steady_config());
        player.run(Instant::now()).unwrap();

        let completed_at = loop {
            let deadline = player.next_deadline().unwrap();
            if player.poll(deadline).unwrap().completed {
                break deadline;
            }
        };

        let settle_at = player.next_deadline().unwrap();
        assert_eq!(settle_at, completed_at + Duration::from_millis(450));

        let early = player.poll(settle_at - Duration::from_millis(1)).unwrap();
        assert!(!early.settled);
        assert!(!player.cursor().hidden());

        assert!(player.poll(settle_at).unwrap().settled);
        assert!(player.cursor().hidden());
        assert_eq!(player.surface().cursor(), Some(player.cursor()));
        assert_eq!(player.next_deadline(), None);
    }

    #[test]
    fn test_settle_with_stay() {
        let config = TypistConfig {
            stay: true,
            ..steady_config()
        };
        let mut player = player(vec![NodeSpec::text("hi")], config);
        player.run(Instant::now()).unwrap();
        drain(&mut player);

        let cursor = player.cursor();
        assert!(!cursor.hidden());
        assert!(cursor.full());
        assert!(cursor.blink());
    }

    #[test]
    fn test_empty_target_settles_directly() {
        let mut player = player(Vec::new(), steady_config());
        let start = Instant::now();
        player.run(start).unwrap();

        assert_eq!(player.phase(), Phase::Completing);
        assert!(player.script().is_empty());
        assert_eq!(player.next_deadline(), Some(start + Duration::from_millis(450)));

        drain(&mut player);
        assert!(player.cursor().hidden());
        assert_eq!(player.surface().reservations(), 0);
    }

    #[test]
    fn test_unchanged_target_completes_without_ops() {
        let mut player = player(vec![NodeSpec::text("same")], steady_config());
        player.run(Instant::now()).unwrap();
        drain(&mut player);

        player.run(Instant::now()).unwrap();
        assert!(player.script().is_empty());
        drain(&mut player);
        assert_eq!(player.surface().visible_text(), "same");
        assert_eq!(player.phase(), Phase::Settled);
    }

    #[test]
    fn test_deleted_nodes_are_detached() {
        let mut player = player(
            vec![NodeSpec::text("keep "), NodeSpec::element("b", "drop"), NodeSpec::element("i", "")],
            steady_config(),
        );
        player.run(Instant::now()).unwrap();
        drain(&mut player);
        assert_eq!(player.surface().nodes().len(), 3);

        player.surface_mut().set_target(vec![NodeSpec::text("keep ")]);
        player.run(Instant::now()).unwrap();
        drain(&mut player);

        assert_eq!(player.surface().visible_text(), "keep ");
        assert_eq!(player.surface().nodes().len(), 1);
        // Only deletions in the second run, so no new reservation.
        assert_eq!(player.surface().reservations(), 1);
    }

    #[test]
    fn test_speed_multiplier_scales_schedule() {
        let config = TypistConfig {
            speed_multiplier: 2.0,
            ..steady_config()
        };
        let mut player = player(vec![NodeSpec::text("abc")], config);
        let start = Instant::now();
        player.run(start).unwrap();

        assert_eq!(player.next_deadline(), Some(start + Duration::from_millis(300)));
    }

    #[test]
    fn test_surface_error_aborts_run() {
        let mut player = player(vec![NodeSpec::text("hello world")], steady_config());
        player.run(Instant::now()).unwrap();
        drain(&mut player);

        player.surface_mut().set_target(vec![NodeSpec::text("hello there")]);
        player.run(Instant::now()).unwrap();

        let typed = player.surface().nodes()[0].id;
        player.surface_mut().detach(typed).unwrap();

        let deadline = player.next_deadline().unwrap();
        let err = player.poll(deadline).unwrap_err();
        assert!(matches!(err, TypistError::Surface(SurfaceError::UnknownNode(id)) if id == typed));
        assert_eq!(player.phase(), Phase::Idle);
        assert_eq!(player.next_deadline(), None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TypistConfig {
            speed_multiplier: -1.0,
            ..TypistConfig::default()
        };
        let result = Player::new(MemorySurface::new(), config);
        assert!(matches!(result, Err(TypistError::Config(_))));
    }
}
