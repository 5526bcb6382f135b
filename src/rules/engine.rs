//! The game engine: phase state machine and action reducer.
//!
//! `GameEngine` owns the only mutable `GameState`. Every action is applied
//! to a copy of the state; the copy replaces the engine's state only when
//! the action succeeds, so rejected actions leave nothing behind.
//!
//! ## Phases
//!
//! `Setup → Deploy → Attack → Fortify → Deploy (next player) → … → Victory`
//!
//! - Deploy ends automatically when the last reinforcement is placed, or
//!   explicitly via `SkipToAttack`.
//! - `BeginFortify` leaves Attack; one fortify move is allowed per turn.
//! - `EndTurn` is legal from Attack or Fortify.
//! - Victory is checked after every conquest and again at turn end. Once
//!   reached, every mutating action is rejected with `GameAlreadyWon`.

use im::Vector;

use crate::core::{
    Action, ActionError, ConfigError, GameConfig, GameRng, GameState, Phase, Player, PlayerId,
    PlayerSpec, RandomSource, Selection,
};
use crate::events::GameEvent;
use crate::map::{TerritoryGraph, TerritoryId};

use super::combat::{CombatOutcome, CombatResolver};
use super::reinforcement::reinforcements_with;
use super::setup::distribute;
use super::victory::{EliminationVictoryChecker, GameResult};

/// Result of an action: the new snapshot or the reason it was refused.
pub type ActionResult = Result<GameState, ActionError>;

/// Owns game state and applies actions one at a time.
#[derive(Debug)]
pub struct GameEngine<R: RandomSource = GameRng> {
    graph: TerritoryGraph,
    config: GameConfig,
    combat: CombatResolver,
    rng: R,
    state: GameState,
    events: Vec<GameEvent>,
}

impl GameEngine<GameRng> {
    /// Engine on the built-in map with default rules and a seeded RNG.
    ///
    /// # Panics
    ///
    /// Panics if the default config fails validation, which the test suite
    /// rules out.
    #[must_use]
    pub fn classic(seed: u64) -> Self {
        Self::new(TerritoryGraph::classic(), GameConfig::default(), GameRng::new(seed))
            .expect("default config should validate")
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Create an engine in the setup phase.
    ///
    /// Fails if `config` does not pass `GameConfig::validate`.
    pub fn new(graph: TerritoryGraph, config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(graph.len(), config.log_capacity);
        Ok(Self {
            combat: CombatResolver::from_config(&config),
            graph,
            config,
            rng,
            state,
            events: Vec::new(),
        })
    }

    // === Queries ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// The territory graph.
    #[must_use]
    pub fn graph(&self) -> &TerritoryGraph {
        &self.graph
    }

    /// The rules configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    /// Active, non-eliminated players in seat order.
    #[must_use]
    pub fn in_play_players(&self) -> Vec<PlayerId> {
        self.state.in_play_players()
    }

    /// Number of territories owned by `player`.
    #[must_use]
    pub fn owned_count(&self, player: PlayerId) -> usize {
        self.state.owned_count(player)
    }

    /// The winner, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    /// The game result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        EliminationVictoryChecker::result(&self.state)
    }

    /// Dice and casualties of the most recent attack.
    #[must_use]
    pub fn last_combat(&self) -> Option<&CombatOutcome> {
        self.state.last_combat.as_ref()
    }

    /// Enemy neighbors of `source`. Empty for unknown or unowned territories.
    #[must_use]
    pub fn attack_targets(&self, source: TerritoryId) -> Vec<TerritoryId> {
        self.neighbors_where(source, |owner, neighbor_owner| neighbor_owner != Some(owner))
    }

    /// Friendly neighbors of `source`. Empty for unknown or unowned territories.
    #[must_use]
    pub fn fortify_destinations(&self, source: TerritoryId) -> Vec<TerritoryId> {
        self.neighbors_where(source, |owner, neighbor_owner| neighbor_owner == Some(owner))
    }

    fn neighbors_where(
        &self,
        source: TerritoryId,
        keep: impl Fn(PlayerId, Option<PlayerId>) -> bool,
    ) -> Vec<TerritoryId> {
        if !self.graph.contains(source) {
            return Vec::new();
        }
        let Some(owner) = self.state.owner(source) else {
            return Vec::new();
        };
        self.graph
            .neighbors(source)
            .iter()
            .copied()
            .filter(|&n| keep(owner, self.state.owner(n)))
            .collect()
    }

    /// Every action the current player may legally take right now.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let state = &self.state;
        if state.is_over() {
            return Vec::new();
        }
        let me = state.current_player;
        let owned: Vec<TerritoryId> = state.owned_territories(me).collect();
        let can_launch = |t: &&TerritoryId| state.armies(**t) >= 2;

        let mut actions = Vec::new();
        match state.phase {
            Phase::Setup | Phase::Victory => {}
            Phase::Deploy => {
                if state.reinforcements > 0 {
                    actions.extend(owned.iter().map(|&territory| Action::DeployArmy { territory }));
                }
                actions.push(Action::SkipToAttack);
            }
            Phase::Attack => {
                match state.selection {
                    Selection::AttackSource { source } => {
                        actions.extend(
                            self.attack_targets(source)
                                .into_iter()
                                .map(|target| Action::Attack { target }),
                        );
                        actions.push(Action::CancelSelection);
                    }
                    _ => actions.extend(
                        owned
                            .iter()
                            .filter(can_launch)
                            .map(|&territory| Action::SelectAttackSource { territory }),
                    ),
                }
                actions.push(Action::BeginFortify);
                actions.push(Action::EndTurn);
            }
            Phase::Fortify => {
                if !state.fortified {
                    match state.selection {
                        Selection::FortifySource { source } => {
                            actions.extend(
                                self.fortify_destinations(source)
                                    .into_iter()
                                    .map(|territory| Action::SelectFortifyDestination { territory }),
                            );
                            actions.push(Action::CancelSelection);
                        }
                        Selection::FortifyPair { source, .. } => {
                            actions.extend(
                                (1..state.armies(source)).map(|amount| Action::Fortify { amount }),
                            );
                            actions.push(Action::CancelSelection);
                        }
                        _ => actions.extend(
                            owned
                                .iter()
                                .filter(can_launch)
                                .map(|&territory| Action::SelectFortifySource { territory }),
                        ),
                    }
                }
                actions.push(Action::EndTurn);
            }
        }
        actions
    }

    // === Actions ===

    /// Seat the roster, deal territories and armies, and start turn one.
    pub fn initialize(&mut self, players: &[PlayerSpec]) -> ActionResult {
        if let Some(winner) = self.state.winner {
            return self.reject("initialize", ActionError::GameAlreadyWon { winner });
        }
        if self.state.phase != Phase::Setup {
            let phase = self.state.phase;
            return self.reject("initialize", ActionError::WrongPhase { phase });
        }
        let active = players.iter().filter(|p| p.active).count();
        let seats = players.len();
        let fits = active >= 2 && active <= self.graph.len() && seats <= self.config.max_players;
        let roster: Option<Vector<Player>> = players
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                u8::try_from(i)
                    .ok()
                    .map(|id| Player::from_spec(PlayerId::new(id), spec))
            })
            .collect();
        let Some(roster) = roster.filter(|_| fits) else {
            return self.reject("initialize", ActionError::InvalidPlayerCount { active, seats });
        };

        let mut next = self.state.clone();
        next.players = roster;

        let allotments = distribute(&mut next, &self.config, &mut self.rng);
        for allotment in &allotments {
            tracing::debug!(
                target: "conquest::setup",
                player = allotment.player.0,
                territories = allotment.territories,
                armies = allotment.armies,
                "setup.allotment"
            );
        }

        let mut events = Vec::new();
        let first = next.in_play_players()[0];
        next.turn_number = 0;
        begin_turn(&mut next, &self.config, first, &mut events);

        tracing::info!(
            target: "conquest::setup",
            players = active,
            territories = self.graph.len(),
            "setup.complete"
        );

        self.state = next;
        self.events.extend(events);
        Ok(self.snapshot())
    }

    /// Apply one action for the current player.
    pub fn apply(&mut self, action: Action) -> ActionResult {
        let mut next = self.state.clone();
        let mut events = Vec::new();
        next.record_action(action);

        let result = Reducer {
            state: &mut next,
            graph: &self.graph,
            config: &self.config,
            combat: &self.combat,
            rng: &mut self.rng,
            events: &mut events,
        }
        .apply(action);

        match result {
            Ok(()) => {
                tracing::debug!(
                    target: "conquest::engine",
                    action = action.name(),
                    player = self.state.current_player.0,
                    phase = ?next.phase,
                    "engine.applied"
                );
                self.state = next;
                self.events.extend(events);
                Ok(self.snapshot())
            }
            Err(err) => self.reject(action.name(), err),
        }
    }

    fn reject(&self, action: &'static str, err: ActionError) -> ActionResult {
        tracing::debug!(
            target: "conquest::engine",
            action,
            player = self.state.current_player.0,
            reason = %err,
            "engine.rejected"
        );
        Err(err)
    }

    /// Place one reinforcement on an owned territory.
    pub fn deploy_army(&mut self, territory: TerritoryId) -> ActionResult {
        self.apply(Action::DeployArmy { territory })
    }

    /// Forfeit remaining reinforcements and start attacking.
    pub fn skip_to_attack(&mut self) -> ActionResult {
        self.apply(Action::SkipToAttack)
    }

    /// Choose the territory to attack from.
    pub fn select_attack_source(&mut self, territory: TerritoryId) -> ActionResult {
        self.apply(Action::SelectAttackSource { territory })
    }

    /// Attack `target` from the selected source.
    pub fn attack(&mut self, target: TerritoryId) -> ActionResult {
        self.apply(Action::Attack { target })
    }

    /// Drop the pending selection.
    pub fn cancel_selection(&mut self) -> ActionResult {
        self.apply(Action::CancelSelection)
    }

    /// Stop attacking and enter the fortify phase.
    pub fn begin_fortify(&mut self) -> ActionResult {
        self.apply(Action::BeginFortify)
    }

    /// Choose the territory to move armies out of.
    pub fn select_fortify_source(&mut self, territory: TerritoryId) -> ActionResult {
        self.apply(Action::SelectFortifySource { territory })
    }

    /// Choose the territory to move armies into.
    pub fn select_fortify_destination(&mut self, territory: TerritoryId) -> ActionResult {
        self.apply(Action::SelectFortifyDestination { territory })
    }

    /// Move `amount` armies between the selected pair.
    pub fn fortify(&mut self, amount: u32) -> ActionResult {
        self.apply(Action::Fortify { amount })
    }

    /// Pass play to the next in-play player.
    pub fn end_turn(&mut self) -> ActionResult {
        self.apply(Action::EndTurn)
    }
}

/// Applies one action to a scratch copy of the state.
///
/// Each handler validates fully before its first write.
struct Reducer<'a, R: ?Sized> {
    state: &'a mut GameState,
    graph: &'a TerritoryGraph,
    config: &'a GameConfig,
    combat: &'a CombatResolver,
    rng: &'a mut R,
    events: &'a mut Vec<GameEvent>,
}

impl<R: RandomSource + ?Sized> Reducer<'_, R> {
    fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        if let Some(winner) = self.state.winner {
            return Err(ActionError::GameAlreadyWon { winner });
        }
        match action {
            Action::DeployArmy { territory } => self.deploy(territory),
            Action::SkipToAttack => self.skip_to_attack(),
            Action::SelectAttackSource { territory } => self.select_attack_source(territory),
            Action::Attack { target } => self.attack(target),
            Action::CancelSelection => self.cancel_selection(),
            Action::BeginFortify => self.begin_fortify(),
            Action::SelectFortifySource { territory } => self.select_fortify_source(territory),
            Action::SelectFortifyDestination { territory } => {
                self.select_fortify_destination(territory)
            }
            Action::Fortify { amount } => self.fortify(amount),
            Action::EndTurn => self.end_turn(),
        }
    }

    // === Validation helpers ===

    fn require_phase(&self, phase: Phase) -> Result<(), ActionError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(ActionError::WrongPhase {
                phase: self.state.phase,
            })
        }
    }

    fn require_known(&self, territory: TerritoryId) -> Result<(), ActionError> {
        if self.graph.contains(territory) {
            Ok(())
        } else {
            Err(ActionError::UnknownTerritory { territory })
        }
    }

    fn require_owned(&self, territory: TerritoryId) -> Result<(), ActionError> {
        self.require_known(territory)?;
        if self.state.owner(territory) == Some(self.state.current_player) {
            Ok(())
        } else {
            Err(ActionError::NotOwner { territory })
        }
    }

    fn require_launchable(&self, territory: TerritoryId) -> Result<(), ActionError> {
        let armies = self.state.armies(territory);
        if armies >= 2 {
            Ok(())
        } else {
            Err(ActionError::InsufficientArmies {
                territory: Some(territory),
                armies,
            })
        }
    }

    fn require_fortify_unused(&self) -> Result<(), ActionError> {
        if self.state.fortified {
            Err(ActionError::FortifyAlreadyUsed)
        } else {
            Ok(())
        }
    }

    fn current_name(&self) -> String {
        self.state.player_name(self.state.current_player).to_string()
    }

    fn log(&mut self, message: String) {
        log_line(self.state, self.events, message);
    }

    // === Deploy ===

    fn deploy(&mut self, territory: TerritoryId) -> Result<(), ActionError> {
        self.require_phase(Phase::Deploy)?;
        self.require_owned(territory)?;
        if self.state.reinforcements == 0 {
            return Err(ActionError::InsufficientArmies {
                territory: None,
                armies: 0,
            });
        }

        self.state.territory_mut(territory).armies += 1;
        self.state.reinforcements -= 1;
        tracing::debug!(
            target: "conquest::engine",
            territory = territory.0,
            remaining = self.state.reinforcements,
            "engine.deploy"
        );

        if self.state.reinforcements == 0 {
            self.state.phase = Phase::Attack;
            let name = self.current_name();
            self.log(format!("{name} finished deploying reinforcements"));
        }
        Ok(())
    }

    fn skip_to_attack(&mut self) -> Result<(), ActionError> {
        self.require_phase(Phase::Deploy)?;

        self.state.reinforcements = 0;
        self.state.phase = Phase::Attack;
        let name = self.current_name();
        self.log(format!("{name} skipped deployment"));
        Ok(())
    }

    // === Attack ===

    fn select_attack_source(&mut self, territory: TerritoryId) -> Result<(), ActionError> {
        self.require_phase(Phase::Attack)?;
        if self.state.selection.is_some() {
            return Err(ActionError::SelectionPending);
        }
        self.require_owned(territory)?;
        self.require_launchable(territory)?;

        self.state.selection = Selection::AttackSource { source: territory };
        Ok(())
    }

    fn attack(&mut self, target: TerritoryId) -> Result<(), ActionError> {
        self.require_phase(Phase::Attack)?;
        let Selection::AttackSource { source } = self.state.selection else {
            return Err(ActionError::NoSelection);
        };
        self.require_known(target)?;
        let attacker = self.state.current_player;
        if self.state.owner(target) == Some(attacker) {
            return Err(ActionError::TargetIsOwnTerritory { territory: target });
        }
        if !self.graph.are_adjacent(source, target) {
            return Err(ActionError::NotAdjacent {
                from: source,
                to: target,
            });
        }
        self.require_launchable(source)?;

        let defender = self.state.owner(target);
        let outcome = self.combat.resolve(
            self.state.armies(source),
            self.state.armies(target),
            &mut *self.rng,
        );

        self.state.territory_mut(source).armies = outcome.source_armies;
        let defended = self.state.territory_mut(target);
        defended.armies = outcome.target_armies;
        if outcome.conquered {
            defended.owner = Some(attacker);
        }
        self.state.selection = Selection::Empty;

        tracing::debug!(
            target: "conquest::combat",
            from = source.0,
            to = target.0,
            attacker_dice = ?outcome.attacker_dice.as_slice(),
            defender_dice = ?outcome.defender_dice.as_slice(),
            attacker_losses = outcome.attacker_losses,
            defender_losses = outcome.defender_losses,
            conquered = outcome.conquered,
            "combat.resolved"
        );

        self.events.push(GameEvent::CombatResolved {
            from: source,
            to: target,
            outcome: outcome.clone(),
        });

        let from_name = self.graph.name(source).to_string();
        let to_name = self.graph.name(target).to_string();
        if outcome.conquered {
            let name = self.current_name();
            self.log(format!("{name} conquered {to_name}!"));
            if let Some(from_player) = defender {
                self.events.push(GameEvent::TerritoryConquered {
                    territory: target,
                    by: attacker,
                    from_player,
                    armies_moved: outcome.armies_moved,
                });
            }
        }
        self.log(format!(
            "Battle: {from_name} → {to_name} | Attacker dice: {:?} Defender dice: {:?}",
            outcome.attacker_dice.as_slice(),
            outcome.defender_dice.as_slice()
        ));
        self.state.last_combat = Some(outcome);

        settle_ownership(self.state, self.events);
        Ok(())
    }

    fn cancel_selection(&mut self) -> Result<(), ActionError> {
        if !self.state.selection.is_some() {
            return Err(ActionError::NoSelection);
        }
        self.state.selection = Selection::Empty;
        Ok(())
    }

    // === Fortify ===

    fn begin_fortify(&mut self) -> Result<(), ActionError> {
        self.require_phase(Phase::Attack)?;

        self.state.phase = Phase::Fortify;
        self.state.selection = Selection::Empty;
        Ok(())
    }

    fn select_fortify_source(&mut self, territory: TerritoryId) -> Result<(), ActionError> {
        self.require_phase(Phase::Fortify)?;
        self.require_fortify_unused()?;
        if self.state.selection.is_some() {
            return Err(ActionError::SelectionPending);
        }
        self.require_owned(territory)?;
        self.require_launchable(territory)?;

        self.state.selection = Selection::FortifySource { source: territory };
        Ok(())
    }

    fn select_fortify_destination(&mut self, territory: TerritoryId) -> Result<(), ActionError> {
        self.require_phase(Phase::Fortify)?;
        self.require_fortify_unused()?;
        let source = match self.state.selection {
            Selection::FortifySource { source } => source,
            Selection::FortifyPair { .. } => return Err(ActionError::SelectionPending),
            _ => return Err(ActionError::NoSelection),
        };
        self.require_owned(territory)?;
        if !self.graph.are_adjacent(source, territory) {
            return Err(ActionError::NotAdjacent {
                from: source,
                to: territory,
            });
        }

        self.state.selection = Selection::FortifyPair {
            source,
            destination: territory,
        };
        Ok(())
    }

    fn fortify(&mut self, amount: u32) -> Result<(), ActionError> {
        self.require_phase(Phase::Fortify)?;
        self.require_fortify_unused()?;
        let Selection::FortifyPair {
            source,
            destination,
        } = self.state.selection
        else {
            return Err(ActionError::NoSelection);
        };
        if amount == 0 {
            return Err(ActionError::InvalidAmount { amount });
        }
        let available = self.state.armies(source);
        if amount >= available {
            return Err(ActionError::InsufficientArmies {
                territory: Some(source),
                armies: available,
            });
        }

        self.state.territory_mut(source).armies -= amount;
        self.state.territory_mut(destination).armies += amount;
        self.state.fortified = true;
        self.state.selection = Selection::Empty;

        let name = self.current_name();
        let from_name = self.graph.name(source).to_string();
        let to_name = self.graph.name(destination).to_string();
        self.log(format!("{name} moved {amount} armies from {from_name} to {to_name}"));
        Ok(())
    }

    // === Turn ===

    fn end_turn(&mut self) -> Result<(), ActionError> {
        match self.state.phase {
            Phase::Attack | Phase::Fortify => {}
            phase => return Err(ActionError::WrongPhase { phase }),
        }

        settle_ownership(self.state, self.events);
        if self.state.is_over() {
            return Ok(());
        }

        let current = self.state.current_player;
        let in_play = self.state.in_play_players();
        let Some(&next) = in_play.iter().find(|&&p| p > current).or(in_play.first()) else {
            return Ok(());
        };
        begin_turn(self.state, self.config, next, self.events);
        Ok(())
    }
}

fn log_line(state: &mut GameState, events: &mut Vec<GameEvent>, message: String) {
    state.log.push(message.clone());
    events.push(GameEvent::Log { message });
}

/// Hand the turn to `player` with fresh reinforcements.
fn begin_turn(
    state: &mut GameState,
    config: &GameConfig,
    player: PlayerId,
    events: &mut Vec<GameEvent>,
) {
    let reinforcements = reinforcements_with(config, state.owned_count(player));

    state.current_player = player;
    state.reinforcements = reinforcements;
    state.phase = Phase::Deploy;
    state.selection = Selection::Empty;
    state.fortified = false;
    state.turn_number += 1;
    state.action_sequence = 0;

    let name = state.player_name(player).to_string();
    log_line(
        state,
        events,
        format!("{name}'s turn begins with {reinforcements} reinforcements"),
    );
    events.push(GameEvent::TurnStarted {
        player,
        reinforcements,
        turn: state.turn_number,
    });
    tracing::debug!(
        target: "conquest::engine",
        player = player.0,
        reinforcements,
        turn = state.turn_number,
        "engine.turn_started"
    );
}

/// Apply eliminations and victory found by the checker.
fn settle_ownership(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let verdict = EliminationVictoryChecker::check(state);
    if verdict.is_quiet() {
        return;
    }

    for player in verdict.eliminated {
        state.players[player.index()].eliminated = true;
        let name = state.player_name(player).to_string();
        log_line(state, events, format!("{name} has been eliminated"));
        events.push(GameEvent::PlayerEliminated { player });
        tracing::info!(target: "conquest::victory", player = player.0, "player.eliminated");
    }

    if let Some(winner) = verdict.winner {
        state.winner = Some(winner);
        state.phase = Phase::Victory;
        state.selection = Selection::Empty;
        let name = state.player_name(winner).to_string();
        log_line(state, events, format!("{name} has conquered the world!"));
        events.push(GameEvent::Victory { winner });
        tracing::info!(
            target: "conquest::victory",
            winner = winner.0,
            turn = state.turn_number,
            "victory.achieved"
        );
    }
}
