use crate::application::{CommandQueue, DueCommand, QueueError, Scheduler, SessionCommand};
use crate::domain::{
    ActivityError, ActivityId, ActivityLifecycle, ActivitySettings, ActivityState, Actor,
    ActorStage, InputAction, MusicTrack, Player, QuitReason, ServerStatus, SessionEvent, SimTime,
    TimeKind,
};
use crate::traits::{ActivityBehavior, ProcessControl};
use std::time::Duration;
use uuid::Uuid;

/// Delay before a scheduled process shutdown fires (real time)
const SHUTDOWN_DELAY: Duration = Duration::from_secs(2);

/// Delay before a scheduled session relaunch fires (real time)
const RELAUNCH_DELAY: Duration = Duration::from_secs(1);

/// Max commands handled per poll
const BATCH_SIZE: usize = 32;

/// Errors surfaced by session operations
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("No current activity")]
    NoCurrentActivity,

    #[error("Previous activity has not finished its transition out")]
    SlotOccupied,

    #[error(transparent)]
    Activity(#[from] ActivityError),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Binding of one player's buttons to the current activity
#[derive(Debug, Clone, PartialEq)]
pub struct InputAssignment {
    pub player_id: Uuid,
    pub owner: ActivityId,
    pub actions: Vec<InputAction>,
}

/// What an activity behavior is allowed to touch from inside a hook
///
/// Borrowed pieces of the session, handed to hooks so they can schedule
/// commands, spawn cosmetic actors and emit events without owning any of
/// the session's state.
pub struct ActivityContext<'a> {
    activity: ActivityId,
    settings: &'a ActivitySettings,
    birth_time: SimTime,
    scheduler: &'a mut Scheduler,
    queue: &'a mut CommandQueue,
    events: &'a mut Vec<SessionEvent>,
    actors: &'a mut ActorStage,
    server_status: &'a ServerStatus,
}

impl ActivityContext<'_> {
    pub fn activity(&self) -> ActivityId {
        self.activity
    }

    /// Current simulation time
    pub fn now(&self) -> SimTime {
        self.scheduler.sim_now()
    }

    pub fn birth_time(&self) -> SimTime {
        self.birth_time
    }

    pub fn settings(&self) -> &ActivitySettings {
        self.settings
    }

    pub fn server_status(&self) -> &ServerStatus {
        self.server_status
    }

    /// Schedule a command owned by this activity; it is silently dropped
    /// if the activity has begun transitioning out by fire time
    pub fn schedule(&mut self, delay: Duration, kind: TimeKind, command: SessionCommand) {
        self.scheduler
            .schedule(delay, kind, Some(self.activity), command);
    }

    /// Request the transition out (processed on the next poll; idempotent)
    pub fn end(&mut self) -> Result<(), SessionError> {
        self.queue.push(SessionCommand::End {
            activity: self.activity,
        })?;
        Ok(())
    }

    /// Construct a cosmetic actor tied to this activity's lifetime
    pub fn spawn(&mut self, actor: Actor) {
        self.actors.spawn(actor.clone());
        self.events.push(SessionEvent::ActorSpawned {
            activity: self.activity,
            actor,
        });
    }

    pub fn set_music(&mut self, track: Option<MusicTrack>) {
        self.events.push(SessionEvent::MusicChanged { track });
    }

    pub fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// One-shot delayed process shutdown; session-owned, so it still
    /// fires after this activity is torn down
    pub fn schedule_shutdown(&mut self, reason: QuitReason) {
        self.scheduler.schedule(
            SHUTDOWN_DELAY,
            TimeKind::Real,
            None,
            SessionCommand::Shutdown { reason },
        );
        self.events.push(SessionEvent::ShutdownScheduled { reason });
    }

    /// One-shot delayed session relaunch; session-owned
    pub fn schedule_relaunch(&mut self) {
        self.scheduler
            .schedule(RELAUNCH_DELAY, TimeKind::Real, None, SessionCommand::Relaunch);
        self.events.push(SessionEvent::RelaunchScheduled);
    }
}

struct ActivityRuntime {
    id: ActivityId,
    lifecycle: ActivityLifecycle,
    settings: ActivitySettings,
    behavior: Box<dyn ActivityBehavior>,
    actors: ActorStage,
}

/// The session: owns the single current activity and arbitrates timers
/// and input events against its lifecycle
///
/// Single-threaded cooperative model: the host calls `advance` from its
/// update loop and `handle_*` for external events; everything else runs
/// inside those calls. Observers read the outcome via `drain_events`.
pub struct Session {
    scheduler: Scheduler,
    queue: CommandQueue,
    events: Vec<SessionEvent>,
    current: Option<ActivityRuntime>,
    assignments: Vec<InputAssignment>,
    players: Vec<Player>,
    server_status: ServerStatus,
    process: Box<dyn ProcessControl>,
}

impl Session {
    pub fn new(server_status: ServerStatus, process: Box<dyn ProcessControl>) -> Self {
        Session {
            scheduler: Scheduler::new(),
            queue: CommandQueue::default(),
            events: Vec::new(),
            current: None,
            assignments: Vec::new(),
            players: Vec::new(),
            server_status,
            process,
        }
    }

    // ===== Queries =====

    pub fn current_activity(&self) -> Option<ActivityId> {
        self.current.as_ref().map(|r| r.id)
    }

    pub fn activity_state(&self) -> Option<ActivityState> {
        self.current.as_ref().map(|r| r.lifecycle.state())
    }

    pub fn current_settings(&self) -> Option<&ActivitySettings> {
        self.current.as_ref().map(|r| &r.settings)
    }

    pub fn current_actors(&self) -> Option<&ActorStage> {
        self.current.as_ref().map(|r| &r.actors)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn assignments(&self) -> &[InputAssignment] {
        &self.assignments
    }

    pub fn sim_now(&self) -> SimTime {
        self.scheduler.sim_now()
    }

    pub fn server_status(&self) -> &ServerStatus {
        &self.server_status
    }

    /// Replace the config snapshot (the host refreshes it on config change)
    pub fn set_server_status(&mut self, status: ServerStatus) {
        self.server_status = status;
    }

    /// Pause the simulation timeline; real-time commands keep firing
    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
    }

    // ===== Lifecycle driving =====

    /// Install a new activity and start its transition in
    ///
    /// Base setup (state transition, event) runs before the behavior's
    /// `on_transition_in` hook. `Begin` is scheduled to fire once the
    /// transition duration elapses.
    pub fn set_activity(
        &mut self,
        behavior: Box<dyn ActivityBehavior>,
    ) -> Result<ActivityId, SessionError> {
        if self.current.is_some() {
            return Err(SessionError::SlotOccupied);
        }

        let id = Uuid::new_v4();
        let settings = behavior.settings();
        let mut lifecycle = ActivityLifecycle::new(self.scheduler.sim_now());
        lifecycle.transition_in()?;

        tracing::info!(activity = %id, "activity transitioning in");
        self.events
            .push(SessionEvent::ActivityTransitioningIn { activity: id });

        let transition_time = settings.transition_time;
        self.current = Some(ActivityRuntime {
            id,
            lifecycle,
            settings,
            behavior,
            actors: ActorStage::new(),
        });

        self.dispatch(|behavior, ctx| behavior.on_transition_in(ctx))?;

        self.scheduler.schedule(
            transition_time,
            TimeKind::Sim,
            Some(id),
            SessionCommand::Begin { activity: id },
        );

        Ok(id)
    }

    /// Begin the current activity's transition out (idempotent)
    pub fn end_activity(&mut self) -> Result<(), SessionError> {
        let id = self
            .current
            .as_ref()
            .map(|r| r.id)
            .ok_or(SessionError::NoCurrentActivity)?;
        self.apply_end(id);
        Ok(())
    }

    /// Deliver a player-join event to the current activity
    pub fn handle_player_join(&mut self, player: Player) -> Result<(), SessionError> {
        let activity = self
            .current
            .as_ref()
            .map(|r| r.id)
            .ok_or(SessionError::NoCurrentActivity)?;

        self.events.push(SessionEvent::PlayerJoined {
            activity,
            player_id: player.id(),
            joined_at: player.joined_at(),
        });

        self.dispatch(|behavior, ctx| behavior.on_player_join(ctx, &player))?;

        if !self.players.iter().any(|p| p.id() == player.id()) {
            self.players.push(player);
        }

        Ok(())
    }

    /// Route a named input action; returns whether it hit an assignment
    ///
    /// Delivery goes through the command queue so the liveness check
    /// happens at handling time, like every other callback.
    pub fn handle_input(
        &mut self,
        player_id: Uuid,
        action: InputAction,
    ) -> Result<bool, SessionError> {
        let hit = self
            .assignments
            .iter()
            .find(|a| a.player_id == player_id && a.actions.contains(&action))
            .map(|a| a.owner);

        let Some(owner) = hit else {
            return Ok(false);
        };

        self.queue.push(SessionCommand::InputFired {
            activity: owner,
            player_id,
        })?;
        self.poll()?;
        Ok(true)
    }

    // ===== The loop =====

    /// Advance both timelines, enqueue whatever came due and process it
    ///
    /// Returns the number of commands handled. A burst of due timers
    /// larger than the queue is drained in slices, so no due command is
    /// ever lost to overflow.
    pub fn advance(&mut self, dt: Duration) -> Result<usize, SessionError> {
        let mut handled = 0;
        for DueCommand { command, .. } in self.scheduler.advance(dt) {
            while self.queue.len() >= self.queue.capacity() {
                handled += self.poll()?;
            }
            self.queue.push(command)?;
        }
        handled += self.poll()?;
        Ok(handled)
    }

    /// Process up to a batch of queued commands
    pub fn poll(&mut self) -> Result<usize, SessionError> {
        let mut processed = 0;

        while processed < BATCH_SIZE {
            match self.queue.pop() {
                Some(cmd) => {
                    self.handle_command(cmd)?;
                    processed += 1;
                }
                None => break,
            }
        }

        Ok(processed)
    }

    /// Drain all emitted events (caller's responsibility)
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== Internals =====

    fn current_matches(&self, activity: ActivityId) -> bool {
        self.current.as_ref().is_some_and(|r| r.id == activity)
    }

    fn current_is_live(&self, activity: ActivityId) -> bool {
        self.current
            .as_ref()
            .is_some_and(|r| r.id == activity && r.lifecycle.state().is_live())
    }

    fn handle_command(&mut self, cmd: SessionCommand) -> Result<(), SessionError> {
        match cmd {
            SessionCommand::Begin { activity } => self.handle_begin(activity),
            SessionCommand::End { activity } => {
                if self.current_matches(activity) {
                    self.apply_end(activity);
                } else {
                    tracing::debug!(%activity, "dropping end for stale activity");
                }
                Ok(())
            }
            SessionCommand::FinishTransitionOut { activity } => {
                self.handle_finish_transition_out(activity)
            }
            SessionCommand::AssignInput {
                activity,
                player_id,
            } => {
                self.handle_assign_input(activity, player_id);
                Ok(())
            }
            SessionCommand::InputFired {
                activity,
                player_id,
            } => {
                if self.current_is_live(activity) {
                    self.dispatch(|behavior, ctx| behavior.on_input_pressed(ctx, player_id))
                } else {
                    tracing::debug!(%activity, %player_id, "dropping input for activity transitioning out");
                    Ok(())
                }
            }
            SessionCommand::ShowContinuePrompt { activity, message } => {
                self.handle_show_continue_prompt(activity, message);
                Ok(())
            }
            SessionCommand::Shutdown { reason } => {
                tracing::info!(%reason, "executing scheduled process shutdown");
                self.process.quit(reason);
                Ok(())
            }
            SessionCommand::Relaunch => {
                tracing::info!("executing scheduled session relaunch");
                self.process.relaunch_session();
                Ok(())
            }
        }
    }

    fn handle_begin(&mut self, activity: ActivityId) -> Result<(), SessionError> {
        if !self.current_matches(activity) {
            tracing::debug!(%activity, "dropping begin for stale activity");
            return Ok(());
        }

        // The activity may have been ended while still fading in; the
        // queued begin is then stale, not an ordering violation.
        let Some(runtime) = self.current.as_mut() else {
            return Ok(());
        };
        if !runtime.lifecycle.state().is_live() {
            tracing::debug!(%activity, "dropping begin; activity already transitioning out");
            return Ok(());
        }

        runtime.lifecycle.begin()?;
        tracing::info!(%activity, "activity began");
        self.events.push(SessionEvent::ActivityBegan { activity });

        self.dispatch(|behavior, ctx| behavior.on_begin(ctx))
    }

    fn apply_end(&mut self, activity: ActivityId) {
        let Some(runtime) = self.current.as_mut() else {
            return;
        };
        if runtime.id != activity {
            return;
        }

        if !runtime.lifecycle.end() {
            tracing::debug!(%activity, "end ignored; already transitioning out");
            return;
        }

        tracing::info!(%activity, "activity ending");
        self.events.push(SessionEvent::ActivityEnding { activity });

        // Input bound to this activity is invalid from here on
        self.assignments.retain(|a| a.owner != activity);

        let transition_time = runtime.settings.transition_time;
        self.scheduler.schedule(
            transition_time,
            TimeKind::Sim,
            Some(activity),
            SessionCommand::FinishTransitionOut { activity },
        );
    }

    fn handle_finish_transition_out(&mut self, activity: ActivityId) -> Result<(), SessionError> {
        if !self.current_matches(activity) {
            tracing::debug!(%activity, "dropping finish-transition-out for stale activity");
            return Ok(());
        }

        let Some(runtime) = self.current.as_mut() else {
            return Ok(());
        };
        runtime.lifecycle.finish_transition_out()?;
        let actors_torn_down = runtime.actors.clear();

        tracing::info!(%activity, actors_torn_down, "activity ended");
        self.events.push(SessionEvent::ActivityEnded {
            activity,
            actors_torn_down,
        });

        self.current = None;
        Ok(())
    }

    fn handle_assign_input(&mut self, activity: ActivityId, player_id: Uuid) {
        if !self.current_is_live(activity) {
            tracing::debug!(%activity, %player_id, "skipping input assignment; activity transitioning out");
            return;
        }

        if !self.players.iter().any(|p| p.id() == player_id) {
            tracing::warn!(%player_id, "skipping input assignment for unknown player");
            return;
        }

        let already_assigned = self
            .assignments
            .iter()
            .any(|a| a.player_id == player_id && a.owner == activity);
        if already_assigned {
            return;
        }

        self.assignments.push(InputAssignment {
            player_id,
            owner: activity,
            actions: InputAction::ALL.to_vec(),
        });
        self.events.push(SessionEvent::InputAssigned {
            activity,
            player_id,
        });
    }

    fn handle_show_continue_prompt(&mut self, activity: ActivityId, message: String) {
        if !self.current_is_live(activity) {
            tracing::debug!(%activity, "dropping continue prompt; activity transitioning out");
            return;
        }

        let Some(runtime) = self.current.as_mut() else {
            return;
        };
        let actor = Actor::ContinuePrompt { message };
        runtime.actors.spawn(actor.clone());
        self.events
            .push(SessionEvent::ActorSpawned { activity, actor });
        self.events
            .push(SessionEvent::ContinuePromptShown { activity });
    }

    /// Run a behavior hook with a context scoped to the current activity
    fn dispatch<F>(&mut self, f: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut dyn ActivityBehavior, &mut ActivityContext<'_>) -> Result<(), SessionError>,
    {
        let Self {
            current,
            scheduler,
            queue,
            events,
            server_status,
            ..
        } = self;

        let runtime = current.as_mut().ok_or(SessionError::NoCurrentActivity)?;

        let mut ctx = ActivityContext {
            activity: runtime.id,
            settings: &runtime.settings,
            birth_time: runtime.lifecycle.birth_time(),
            scheduler,
            queue,
            events,
            actors: &mut runtime.actors,
            server_status,
        };

        f(runtime.behavior.as_mut(), &mut ctx)
    }
}
