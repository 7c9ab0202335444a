//! Standard Deck
//!
//! Cards, suits and ranks for the 52-card games, plus deterministic deck
//! construction. Decks are `VecDeque<Card>`: the front is the next card to
//! draw, `push_back` returns cards to the bottom.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    /// ♥
    Hearts,
    /// ♦
    Diamonds,
    /// ♣
    Clubs,
    /// ♠
    Spades,
}

/// Render color of a suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// Hearts and diamonds
    Red,
    /// Clubs and spades
    Black,
}

impl Suit {
    /// All four suits, in deck construction order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Render color.
    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    /// Unicode symbol for display.
    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All thirteen ranks, ace low, in deck construction order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Comparison value in War: ace high (14), king 13, queen 12, jack 11,
    /// numerics at face value.
    pub fn war_value(self) -> u8 {
        match self {
            Rank::Ace => 14,
            other => other as u8,
        }
    }

    /// Face value, ace low: 1 through 13.
    pub fn face_value(self) -> u8 {
        self as u8
    }

    /// Short label for display ("A", "2", .., "10", "J", "Q", "K").
    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable id, 0..52, assigned in deck construction order
    pub id: u8,
    /// Suit
    pub suit: Suit,
    /// Rank
    pub rank: Rank,
    /// Whether the card is shown face-up
    pub face_up: bool,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Build the 52 cards in suit-major order, all face-down.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    let mut id = 0;
    for &suit in &Suit::ALL {
        for &rank in &Rank::ALL {
            cards.push(Card {
                id,
                suit,
                rank,
                face_up: false,
            });
            id += 1;
        }
    }
    cards
}

/// A freshly shuffled deck.
pub fn shuffled_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut cards = standard_deck();
    rng.shuffle(&mut cards);
    cards
}

/// Deal `n` cards from the top of `deck` (fewer if the deck runs out).
pub fn deal(deck: &mut VecDeque<Card>, n: usize) -> Vec<Card> {
    let take = n.min(deck.len());
    deck.drain(..take).collect()
}

// =============================================================================
// TESTS
// =============================================================================
