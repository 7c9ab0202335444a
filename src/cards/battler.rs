//! Battler
//!
//! A score race against a computer opponent. Both sides hold ten
//! value-only cards drawn from a shared 52-card deck (four copies of each
//! value 1 through 13); playing a card banks its value and draws a
//! replacement while the deck lasts. First to 100 points wins; if both
//! hands empty out first, the higher score takes it.
//!
//! The computer's move is paced by the shell: [`BattlerState::schedule_computer`]
//! hands out a [`TurnTicket`], and after its think delay the shell calls
//! [`BattlerState::computer_turn`] with it. Tickets from before a reset
//! are stale and ignored.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::rng::GameRng;

/// Score that ends the game immediately.
const WIN_SCORE: u32 = 100;

/// Once either score reaches this, the computer stops randomizing and
/// plays its highest card.
const ENDGAME_THRESHOLD: u32 = 80;

/// Cards dealt to each hand at game start.
const HAND_SIZE: usize = 10;

/// A value-only card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlerCard {
    /// Stable id, unique within a game
    pub id: u32,
    /// Point value, 1 through 13
    pub value: u8,
}

/// Which side is acting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    /// The person at the screen
    Human,
    /// The built-in opponent
    Computer,
}

impl Seat {
    /// The opposing seat.
    pub fn other(self) -> Seat {
        match self {
            Seat::Human => Seat::Computer,
            Seat::Computer => Seat::Human,
        }
    }
}

/// Game status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlerStatus {
    /// Game in progress
    Playing,
    /// Human reached 100 first (or held the higher score at exhaustion)
    HumanWins,
    /// Computer reached 100 first (or held the higher score at exhaustion)
    ComputerWins,
}

/// Token for the shell's computer think delay.
///
/// Stale after a reset; `computer_turn` ignores tickets whose generation
/// no longer matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnTicket {
    generation: u32,
}

/// Complete state of a Battler game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattlerState {
    deck: VecDeque<BattlerCard>,
    human_hand: Vec<BattlerCard>,
    computer_hand: Vec<BattlerCard>,
    human_score: u32,
    computer_score: u32,
    turn: Seat,
    status: BattlerStatus,
    generation: u32,
    rng_seed: u64,
    #[serde(skip)]
    rng: GameRng,
}

impl BattlerState {
    /// Start a new game: shuffle the shared deck and deal ten cards each,
    /// alternating. The human moves first.
    pub fn new_game(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let (deck, human_hand, computer_hand) = deal(&mut rng);

        info!(seed, "battler game started");
        Self {
            deck,
            human_hand,
            computer_hand,
            human_score: 0,
            computer_score: 0,
            turn: Seat::Human,
            status: BattlerStatus::Playing,
            generation: 0,
            rng_seed: seed,
            rng,
        }
    }

    /// Restart with a fresh shuffle, continuing the RNG sequence. Bumps
    /// the generation, which invalidates outstanding tickets.
    pub fn reset(&mut self) {
        let (deck, human_hand, computer_hand) = deal(&mut self.rng);
        self.deck = deck;
        self.human_hand = human_hand;
        self.computer_hand = computer_hand;
        self.human_score = 0;
        self.computer_score = 0;
        self.turn = Seat::Human;
        self.status = BattlerStatus::Playing;
        self.generation += 1;
    }

    /// Play the card at `index` from `seat`'s hand.
    ///
    /// Silent no-op (false) unless the game is running, it is `seat`'s
    /// turn and `index` is within the hand. Banks the card's value, draws
    /// a replacement while the deck lasts, then checks the win conditions
    /// before passing the turn.
    pub fn play_card(&mut self, seat: Seat, index: usize) -> bool {
        if self.status != BattlerStatus::Playing || self.turn != seat {
            return false;
        }
        let hand = self.hand_mut(seat);
        if index >= hand.len() {
            return false;
        }

        let card = hand.remove(index);
        if let Some(drawn) = self.deck.pop_front() {
            self.hand_mut(seat).push(drawn);
        }
        match seat {
            Seat::Human => self.human_score += card.value as u32,
            Seat::Computer => self.computer_score += card.value as u32,
        }
        debug!(
            ?seat,
            value = card.value,
            human = self.human_score,
            computer = self.computer_score,
            "card played"
        );

        // Reaching the target ends the game before the turn passes
        if self.score(seat) >= WIN_SCORE {
            self.status = match seat {
                Seat::Human => BattlerStatus::HumanWins,
                Seat::Computer => BattlerStatus::ComputerWins,
            };
            info!(status = ?self.status, "battler game over");
            return true;
        }

        // Both hands empty: the higher score wins, the human taking ties
        if self.human_hand.is_empty() && self.computer_hand.is_empty() {
            self.status = if self.computer_score > self.human_score {
                BattlerStatus::ComputerWins
            } else {
                BattlerStatus::HumanWins
            };
            info!(status = ?self.status, "battler game over (hands empty)");
            return true;
        }

        self.turn = seat.other();
        // An empty hand forfeits its turns until the game resolves
        if self.hand(self.turn).is_empty() {
            self.turn = self.turn.other();
        }
        true
    }

    /// Hand control to the shell for the computer's think delay.
    ///
    /// Returns a ticket only when it is actually the computer's move.
    pub fn schedule_computer(&mut self) -> Option<TurnTicket> {
        if self.status != BattlerStatus::Playing || self.turn != Seat::Computer {
            return None;
        }
        Some(TurnTicket {
            generation: self.generation,
        })
    }

    /// Execute the computer's move.
    ///
    /// Plays the highest card once either score has entered the endgame,
    /// otherwise a uniformly random one. A stale ticket is a no-op.
    pub fn computer_turn(&mut self, ticket: TurnTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        if self.status != BattlerStatus::Playing
            || self.turn != Seat::Computer
            || self.computer_hand.is_empty()
        {
            return false;
        }

        let index = if self.human_score >= ENDGAME_THRESHOLD
            || self.computer_score >= ENDGAME_THRESHOLD
        {
            self.computer_hand
                .iter()
                .enumerate()
                .max_by_key(|(_, card)| card.value)
                .map(|(i, _)| i)
                .unwrap_or(0)
        } else {
            self.rng.next_int(self.computer_hand.len() as u32) as usize
        };

        self.play_card(Seat::Computer, index)
    }

    fn hand(&self, seat: Seat) -> &Vec<BattlerCard> {
        match seat {
            Seat::Human => &self.human_hand,
            Seat::Computer => &self.computer_hand,
        }
    }

    fn hand_mut(&mut self, seat: Seat) -> &mut Vec<BattlerCard> {
        match seat {
            Seat::Human => &mut self.human_hand,
            Seat::Computer => &mut self.computer_hand,
        }
    }

    fn score(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Human => self.human_score,
            Seat::Computer => self.computer_score,
        }
    }

    /// The human's hand.
    pub fn human_hand(&self) -> &[BattlerCard] {
        &self.human_hand
    }

    /// The computer's hand (the shell renders these face-down).
    pub fn computer_hand(&self) -> &[BattlerCard] {
        &self.computer_hand
    }

    /// Scores as (human, computer).
    pub fn scores(&self) -> (u32, u32) {
        (self.human_score, self.computer_score)
    }

    /// Whose turn it is.
    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// Current status.
    pub fn status(&self) -> BattlerStatus {
        self.status
    }

    /// Cards left in the shared draw deck.
    pub fn deck_count(&self) -> usize {
        self.deck.len()
    }

    /// The seed this game was created from.
    pub fn seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Shuffle a fresh 52-card value deck and deal the two starting hands,
/// alternating human, computer.
fn deal(rng: &mut GameRng) -> (VecDeque<BattlerCard>, Vec<BattlerCard>, Vec<BattlerCard>) {
    let mut cards: Vec<BattlerCard> = (0u32..52)
        .map(|id| BattlerCard {
            id,
            value: (id % 13 + 1) as u8,
        })
        .collect();
    rng.shuffle(&mut cards);

    let mut deck: VecDeque<BattlerCard> = cards.into();
    let mut human = Vec::with_capacity(HAND_SIZE);
    let mut computer = Vec::with_capacity(HAND_SIZE);
    for _ in 0..HAND_SIZE {
        human.push(deck.pop_front().expect("deck holds 52 cards"));
        computer.push(deck.pop_front().expect("deck holds 52 cards"));
    }
    (deck, human, computer)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_deal() {
        let state = BattlerState::new_game(42);
        assert_eq!(state.human_hand().len(), 10);
        assert_eq!(state.computer_hand().len(), 10);
        assert_eq!(state.deck_count(), 32);
        assert_eq!(state.turn(), Seat::Human);
        assert_eq!(state.scores(), (0, 0));

        // Never more than four copies of a value in play
        let mut counts = [0u8; 14];
        for card in state
            .human_hand()
            .iter()
            .chain(state.computer_hand().iter())
        {
            counts[card.value as usize] += 1;
        }
        assert!(counts.iter().all(|&n| n <= 4));

        let state2 = BattlerState::new_game(42);
        assert_eq!(state.human_hand(), state2.human_hand());
    }

    #[test]
    fn test_play_card_banks_and_draws() {
        let mut state = BattlerState::new_game(7);
        let value = state.human_hand()[2].value;

        assert!(state.play_card(Seat::Human, 2));
        assert_eq!(state.scores().0, value as u32);
        // Replacement drawn, hand size unchanged
        assert_eq!(state.human_hand().len(), 10);
        assert_eq!(state.deck_count(), 31);
        assert_eq!(state.turn(), Seat::Computer);
    }

    #[test]
    fn test_invalid_plays_are_noops() {
        let mut state = BattlerState::new_game(7);

        // Out of turn
        assert!(!state.play_card(Seat::Computer, 0));
        // Index out of hand
        assert!(!state.play_card(Seat::Human, 10));
        assert_eq!(state.scores(), (0, 0));
        assert_eq!(state.turn(), Seat::Human);
    }

    #[test]
    fn test_threshold_crossing_wins_immediately() {
        let mut state = BattlerState::new_game(7);
        state.human_score = 95;
        state.human_hand[0].value = 6;

        assert!(state.play_card(Seat::Human, 0));
        assert_eq!(state.status(), BattlerStatus::HumanWins);
        assert_eq!(state.scores().0, 101);

        // Nothing moves after the game ends
        let ticket = state.schedule_computer();
        assert!(ticket.is_none());
        assert!(!state.play_card(Seat::Computer, 0));
    }

    #[test]
    fn test_computer_turn_flow() {
        let mut state = BattlerState::new_game(11);
        assert!(state.schedule_computer().is_none());

        assert!(state.play_card(Seat::Human, 0));
        let ticket = state.schedule_computer().unwrap();
        assert!(state.computer_turn(ticket));
        assert!(state.scores().1 > 0);
        assert_eq!(state.turn(), Seat::Human);
    }

    #[test]
    fn test_computer_plays_highest_in_endgame() {
        let mut state = BattlerState::new_game(11);
        state.human_score = 85;
        state.turn = Seat::Computer;

        let best = state
            .computer_hand()
            .iter()
            .map(|c| c.value)
            .max()
            .unwrap();
        let ticket = state.schedule_computer().unwrap();
        let before = state.scores().1;

        assert!(state.computer_turn(ticket));
        assert_eq!(state.scores().1, before + best as u32);
    }

    #[test]
    fn test_stale_ticket_after_reset_is_noop() {
        let mut state = BattlerState::new_game(11);
        state.play_card(Seat::Human, 0);
        let stale = state.schedule_computer().unwrap();

        state.reset();
        assert!(!state.computer_turn(stale));
        assert_eq!(state.scores(), (0, 0));
        assert_eq!(state.turn(), Seat::Human);
    }

    #[test]
    fn test_exhaustion_higher_score_wins() {
        let mut state = BattlerState::new_game(3);
        // Strip the game down to one low-value card each, no draw deck
        state.deck.clear();
        state.human_hand = vec![BattlerCard { id: 100, value: 2 }];
        state.computer_hand = vec![BattlerCard { id: 101, value: 3 }];
        state.human_score = 40;
        state.computer_score = 50;

        assert!(state.play_card(Seat::Human, 0));
        assert_eq!(state.status(), BattlerStatus::Playing);
        assert!(state.play_card(Seat::Computer, 0));
        assert_eq!(state.status(), BattlerStatus::ComputerWins);
        assert_eq!(state.scores(), (42, 53));
    }

    #[test]
    fn test_exhaustion_tie_goes_to_human() {
        let mut state = BattlerState::new_game(3);
        state.deck.clear();
        state.human_hand = vec![BattlerCard { id: 100, value: 5 }];
        state.computer_hand = vec![BattlerCard { id: 101, value: 5 }];
        state.human_score = 40;
        state.computer_score = 40;

        assert!(state.play_card(Seat::Human, 0));
        assert!(state.play_card(Seat::Computer, 0));
        assert_eq!(state.status(), BattlerStatus::HumanWins);
    }

    #[test]
    fn test_game_reproducible_from_seed() {
        let run = |seed| {
            let mut state = BattlerState::new_game(seed);
            while state.status() == BattlerStatus::Playing {
                if state.turn() == Seat::Human {
                    state.play_card(Seat::Human, 0);
                } else if let Some(ticket) = state.schedule_computer() {
                    state.computer_turn(ticket);
                }
            }
            (state.scores(), state.status())
        };

        assert_eq!(run(99), run(99));
    }
}
