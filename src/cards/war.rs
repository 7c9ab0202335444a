//! War
//!
//! Both sides flip their top card; the higher War value takes both cards
//! plus anything staked in the pile. Equal values escalate: each side
//! stakes three cards face-down and flips a fourth, repeating on further
//! ties. A side that cannot cover its stake forfeits, and running out of
//! cards entirely loses the game.
//!
//! Round resolution is split in two so the shell can animate: `draw` (or
//! `resolve_war`) computes the outcome and returns a [`RoundTicket`];
//! after its reveal delay the shell calls [`WarState::finish_round`] with
//! the ticket, which runs the deferred out-of-cards check. Tickets from
//! before a reset are stale and ignored.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::deck::{shuffled_deck, Card};
use crate::core::rng::GameRng;

/// Cards each side must stake in a war: three face-down plus the flipped
/// battle card.
const WAR_STAKE: usize = 4;

/// Game status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarStatus {
    /// Normal rounds
    Playing,
    /// A tie is on the table; the next action is `resolve_war`
    War,
    /// Player took every card (or the computer forfeited)
    PlayerWins,
    /// Computer took every card (or the player forfeited)
    ComputerWins,
}

/// Token for the deferred end-of-round check.
///
/// Stale after a reset; `finish_round` ignores tickets whose generation no
/// longer matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundTicket {
    generation: u32,
}

/// Complete state of a War game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WarState {
    player_deck: VecDeque<Card>,
    computer_deck: VecDeque<Card>,
    /// Display snapshots of the cards just flipped; the authoritative
    /// cards have already moved to the winner's deck or the pile
    player_battle: Option<Card>,
    computer_battle: Option<Card>,
    war_pile: Vec<Card>,
    status: WarStatus,
    round: u32,
    message: String,
    generation: u32,
    /// A round is mid-animation; draws are locked until `finish_round`
    processing: bool,
    rng_seed: u64,
    #[serde(skip)]
    rng: GameRng,
}

impl WarState {
    /// Start a new game from a seed: fresh shuffle, 26 cards each.
    pub fn new_game(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let cards = shuffled_deck(&mut rng);
        let (player, computer) = split(cards);

        info!(seed, "war game started");
        Self {
            player_deck: player,
            computer_deck: computer,
            player_battle: None,
            computer_battle: None,
            war_pile: Vec::new(),
            status: WarStatus::Playing,
            round: 0,
            message: "Draw to start the battle".to_string(),
            generation: 0,
            processing: false,
            rng_seed: seed,
            rng,
        }
    }

    /// Restart with a fresh shuffle.
    ///
    /// The RNG continues from its current state, so successive resets of
    /// one game produce different deals while the whole session stays
    /// reproducible from the original seed. Bumps the generation, which
    /// invalidates outstanding tickets.
    pub fn reset(&mut self) {
        let mut cards = crate::cards::deck::standard_deck();
        self.rng.shuffle(&mut cards);
        let (player, computer) = split(cards);

        self.player_deck = player;
        self.computer_deck = computer;
        self.player_battle = None;
        self.computer_battle = None;
        self.war_pile.clear();
        self.status = WarStatus::Playing;
        self.round = 0;
        self.message = "Draw to start the battle".to_string();
        self.generation += 1;
        self.processing = false;
    }

    /// Play one normal round: both sides flip their top card.
    ///
    /// Returns None (no state change) unless the status is Playing and no
    /// round is mid-animation. On a tie both cards go to the pile and the
    /// status becomes War.
    pub fn draw(&mut self) -> Option<RoundTicket> {
        if self.status != WarStatus::Playing || self.processing {
            return None;
        }
        let player_card = face_up(self.player_deck.pop_front()?);
        let computer_card = match self.computer_deck.pop_front() {
            Some(card) => face_up(card),
            None => {
                // Should have been caught by the previous finish_round
                self.player_deck.push_front(player_card);
                return None;
            }
        };

        self.round += 1;
        self.player_battle = Some(player_card);
        self.computer_battle = Some(computer_card);

        let pv = player_card.rank.war_value();
        let cv = computer_card.rank.war_value();
        debug!(round = self.round, pv, cv, "war round drawn");

        if pv > cv {
            self.collect(true, player_card, computer_card);
            self.message = format!("You win round {} with {}", self.round, player_card);
        } else if pv < cv {
            self.collect(false, player_card, computer_card);
            self.message = format!("Computer wins round {} with {}", self.round, computer_card);
        } else {
            self.war_pile.push(player_card);
            self.war_pile.push(computer_card);
            self.status = WarStatus::War;
            self.message = format!("War! Both played {}", player_card.rank.label());
        }

        self.processing = true;
        Some(RoundTicket {
            generation: self.generation,
        })
    }

    /// Resolve a pending war: stake three cards each, flip a fourth.
    ///
    /// A side that cannot cover the four-card stake forfeits on the spot
    /// (no ticket); when both are short, the side holding more cards wins,
    /// the player winning an exact tie. A tied battle card leaves the
    /// status at War for another resolution.
    pub fn resolve_war(&mut self) -> Option<RoundTicket> {
        if self.status != WarStatus::War || self.processing {
            return None;
        }

        let p = self.player_deck.len();
        let c = self.computer_deck.len();
        if p < WAR_STAKE || c < WAR_STAKE {
            let player_wins = if p < WAR_STAKE && c < WAR_STAKE {
                p >= c
            } else {
                c < WAR_STAKE
            };
            if player_wins {
                self.status = WarStatus::PlayerWins;
                self.message = "Computer cannot cover the war. You win!".to_string();
            } else {
                self.status = WarStatus::ComputerWins;
                self.message = "You cannot cover the war. Computer wins!".to_string();
            }
            info!(round = self.round, status = ?self.status, "war forfeited");
            return None;
        }

        // Three face-down stakes from each side
        for _ in 0..WAR_STAKE - 1 {
            self.war_pile
                .push(self.player_deck.pop_front().expect("length checked"));
            self.war_pile
                .push(self.computer_deck.pop_front().expect("length checked"));
        }

        let player_card = face_up(self.player_deck.pop_front().expect("length checked"));
        let computer_card = face_up(self.computer_deck.pop_front().expect("length checked"));
        self.player_battle = Some(player_card);
        self.computer_battle = Some(computer_card);

        let pv = player_card.rank.war_value();
        let cv = computer_card.rank.war_value();

        if pv > cv {
            self.collect(true, player_card, computer_card);
            self.status = WarStatus::Playing;
            self.message = format!("You win the war with {}", player_card);
        } else if pv < cv {
            self.collect(false, player_card, computer_card);
            self.status = WarStatus::Playing;
            self.message = format!("Computer wins the war with {}", computer_card);
        } else {
            self.war_pile.push(player_card);
            self.war_pile.push(computer_card);
            self.message = "The war continues!".to_string();
        }

        self.processing = true;
        Some(RoundTicket {
            generation: self.generation,
        })
    }

    /// The deferred end-of-round check, called by the shell after its
    /// reveal delay.
    ///
    /// Unlocks the next draw and declares the game over if a side is out
    /// of cards. A stale ticket (issued before a reset) is a no-op.
    pub fn finish_round(&mut self, ticket: RoundTicket) {
        if ticket.generation != self.generation {
            return;
        }
        self.processing = false;

        if matches!(self.status, WarStatus::Playing | WarStatus::War) {
            if self.player_deck.is_empty() {
                self.status = WarStatus::ComputerWins;
                self.message = "You are out of cards. Computer wins!".to_string();
                info!(round = self.round, "war game over");
            } else if self.computer_deck.is_empty() {
                self.status = WarStatus::PlayerWins;
                self.message = "Computer is out of cards. You win!".to_string();
                info!(round = self.round, "war game over");
            }
        }
    }

    /// Award both battle cards plus the whole pile to one side's deck
    /// bottom.
    fn collect(&mut self, to_player: bool, player_card: Card, computer_card: Card) {
        let deck = if to_player {
            &mut self.player_deck
        } else {
            &mut self.computer_deck
        };
        deck.push_back(player_card);
        deck.push_back(computer_card);
        deck.extend(self.war_pile.drain(..));
    }

    /// Cards left in the player's deck.
    pub fn player_count(&self) -> usize {
        self.player_deck.len()
    }

    /// Cards left in the computer's deck.
    pub fn computer_count(&self) -> usize {
        self.computer_deck.len()
    }

    /// Cards staked in the current pile.
    pub fn pile_count(&self) -> usize {
        self.war_pile.len()
    }

    /// The most recently flipped cards (player, computer), for rendering.
    pub fn battle_cards(&self) -> (Option<Card>, Option<Card>) {
        (self.player_battle, self.computer_battle)
    }

    /// Current status.
    pub fn status(&self) -> WarStatus {
        self.status
    }

    /// Rounds drawn so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Status line for the shell.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Is a round mid-animation?
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// The seed this game was created from.
    pub fn seed(&self) -> u64 {
        self.rng_seed
    }

    #[cfg(test)]
    fn with_decks(player: Vec<Card>, computer: Vec<Card>) -> Self {
        let mut state = Self::new_game(0);
        state.player_deck = player.into();
        state.computer_deck = computer.into();
        state
    }
}

/// Turn a card face-up.
fn face_up(mut card: Card) -> Card {
    card.face_up = true;
    card
}

/// Split a full deck into the two 26-card starting decks.
fn split(cards: Vec<Card>) -> (VecDeque<Card>, VecDeque<Card>) {
    let mut player = VecDeque::with_capacity(26);
    let mut computer = VecDeque::with_capacity(26);
    for (i, card) in cards.into_iter().enumerate() {
        if i % 2 == 0 {
            player.push_back(card);
        } else {
            computer.push_back(card);
        }
    }
    (player, computer)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::deck::{standard_deck, Rank, Suit};
    use proptest::prelude::*;

    fn card(rank: Rank, suit: Suit) -> Card {
        standard_deck()
            .into_iter()
            .find(|c| c.rank == rank && c.suit == suit)
            .unwrap()
    }

    fn total_cards(state: &WarState) -> usize {
        state.player_count() + state.computer_count() + state.pile_count()
    }

    #[test]
    fn test_new_game_split() {
        let state = WarState::new_game(42);
        assert_eq!(state.player_count(), 26);
        assert_eq!(state.computer_count(), 26);
        assert_eq!(state.status(), WarStatus::Playing);
        assert_eq!(state.round(), 0);

        // Same seed deals the same game
        let again = WarState::new_game(42);
        assert_eq!(state.player_deck, again.player_deck);
    }

    #[test]
    fn test_draw_higher_card_takes_both() {
        let mut state = WarState::with_decks(
            vec![card(Rank::King, Suit::Hearts), card(Rank::Two, Suit::Hearts)],
            vec![card(Rank::Five, Suit::Clubs), card(Rank::Three, Suit::Clubs)],
        );

        let ticket = state.draw().unwrap();
        assert_eq!(state.player_count(), 3);
        assert_eq!(state.computer_count(), 1);
        assert_eq!(state.round(), 1);

        // Locked until the shell finishes the round
        assert!(state.draw().is_none());
        state.finish_round(ticket);
        assert!(!state.is_processing());
    }

    #[test]
    fn test_tie_enters_war() {
        let mut state = WarState::with_decks(
            vec![card(Rank::Ten, Suit::Hearts), card(Rank::Two, Suit::Hearts)],
            vec![card(Rank::Ten, Suit::Spades), card(Rank::Three, Suit::Clubs)],
        );

        let ticket = state.draw().unwrap();
        assert_eq!(state.status(), WarStatus::War);
        assert_eq!(state.pile_count(), 2);
        state.finish_round(ticket);

        // Normal draws are refused during a war
        assert!(state.draw().is_none());
    }

    #[test]
    fn test_repeated_tens_escalate_the_war() {
        // Both sides open with a ten, then flip another ten as the war
        // battle card: each consumes 4 more cards and the war continues
        let player = vec![
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Three, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Ten, Suit::Diamonds),
            card(Rank::Ace, Suit::Hearts),
        ];
        let computer = vec![
            card(Rank::Ten, Suit::Spades),
            card(Rank::Two, Suit::Clubs),
            card(Rank::Three, Suit::Clubs),
            card(Rank::Four, Suit::Clubs),
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Five, Suit::Clubs),
        ];
        let mut state = WarState::with_decks(player, computer);
        let start_total = total_cards(&state);

        let ticket = state.draw().unwrap();
        state.finish_round(ticket);
        assert_eq!(state.status(), WarStatus::War);

        let ticket = state.resolve_war().unwrap();
        state.finish_round(ticket);
        assert_eq!(state.status(), WarStatus::War);
        assert_eq!(state.pile_count(), 10);
        assert_eq!(state.player_count(), 1);
        assert_eq!(state.computer_count(), 1);
        assert_eq!(total_cards(&state), start_total);
    }

    #[test]
    fn test_war_forfeit_when_short() {
        // Player holds 3 cards after the tie, cannot stake 4
        let player = vec![
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Three, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
        ];
        let computer = vec![
            card(Rank::Ten, Suit::Spades),
            card(Rank::Two, Suit::Clubs),
            card(Rank::Three, Suit::Clubs),
            card(Rank::Four, Suit::Clubs),
            card(Rank::Five, Suit::Clubs),
        ];
        let mut state = WarState::with_decks(player, computer);

        let ticket = state.draw().unwrap();
        state.finish_round(ticket);
        assert_eq!(state.status(), WarStatus::War);

        assert!(state.resolve_war().is_none());
        assert_eq!(state.status(), WarStatus::ComputerWins);
    }

    #[test]
    fn test_both_short_more_cards_wins() {
        let player = vec![
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Three, Suit::Hearts),
        ];
        let computer = vec![
            card(Rank::Ten, Suit::Spades),
            card(Rank::Two, Suit::Clubs),
        ];
        let mut state = WarState::with_decks(player, computer);

        let ticket = state.draw().unwrap();
        state.finish_round(ticket);
        assert!(state.resolve_war().is_none());
        assert_eq!(state.status(), WarStatus::PlayerWins);
    }

    #[test]
    fn test_out_of_cards_loses_at_finish() {
        let mut state = WarState::with_decks(
            vec![card(Rank::King, Suit::Hearts)],
            vec![card(Rank::Five, Suit::Clubs), card(Rank::Three, Suit::Clubs)],
        );

        // Computer wins the only round; the player's deck is empty but the
        // loss lands on finish_round, after the reveal delay
        let mut state2 = WarState::with_decks(
            vec![card(Rank::Two, Suit::Hearts)],
            vec![card(Rank::Five, Suit::Clubs)],
        );
        let ticket = state2.draw().unwrap();
        assert_eq!(state2.status(), WarStatus::Playing);
        state2.finish_round(ticket);
        assert_eq!(state2.status(), WarStatus::ComputerWins);

        // And symmetrically for the computer running out
        let ticket = state.draw().unwrap();
        state.finish_round(ticket);
        assert_eq!(state.status(), WarStatus::Playing);
        assert_eq!(state.computer_count(), 1);
    }

    #[test]
    fn test_stale_ticket_after_reset_is_noop() {
        let mut state = WarState::with_decks(
            vec![card(Rank::Two, Suit::Hearts)],
            vec![card(Rank::Five, Suit::Clubs)],
        );
        let stale = state.draw().unwrap();

        state.reset();
        state.finish_round(stale);

        // The stale zero-card check did not fire on the fresh game
        assert_eq!(state.status(), WarStatus::Playing);
        assert_eq!(state.player_count(), 26);
        assert!(state.draw().is_some());
    }

    #[test]
    fn test_reset_reshuffles() {
        let mut state = WarState::new_game(5);
        let first_deal: Vec<Card> = state.player_deck.iter().copied().collect();

        state.reset();
        let second_deal: Vec<Card> = state.player_deck.iter().copied().collect();
        assert_ne!(first_deal, second_deal);
        assert_eq!(total_cards(&state), 52);
    }

    proptest! {
        #[test]
        fn prop_war_conserves_52_cards(seed in any::<u64>(), steps in 1usize..200) {
            let mut state = WarState::new_game(seed);

            for _ in 0..steps {
                let ticket = match state.status() {
                    WarStatus::Playing => state.draw(),
                    WarStatus::War => state.resolve_war(),
                    _ => break,
                };
                if let Some(ticket) = ticket {
                    state.finish_round(ticket);
                }
                prop_assert_eq!(total_cards(&state), 52);
            }
        }
    }
}
