//! Card types and the static card set used to seed game decks.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub type CardId = i64;

/// Behavioral family of a card. Every code dispatches to exactly one effect
/// handler; codes without a bespoke handler fall through to the default arm
/// (discard with no further effect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCode {
    /// "lla" Lanzallamas: eliminate an adjacent player.
    #[serde(rename = "lla")]
    Flamethrower,
    /// "ana" Análisis: view the target's full hand.
    #[serde(rename = "ana")]
    Analysis,
    /// "sos" Sospecha: view one random card from the target's hand.
    #[serde(rename = "sos")]
    Suspicion,
    /// "whk" Whisky: reveal own hand to everyone.
    #[serde(rename = "whk")]
    Whisky,
    /// "cdl" ¡Cambio de lugar!: swap seats with an adjacent player.
    #[serde(rename = "cdl")]
    ChangePlaces,
    /// "mvc" ¡Más vale que corras!: swap seats with any non-quarantined player.
    #[serde(rename = "mvc")]
    RunAway,
    /// "vte" Vigila tus espaldas: reverse the play direction.
    #[serde(rename = "vte")]
    WatchYourBack,
    /// "sed" ¡Seducción!: force a card exchange with the target.
    #[serde(rename = "sed")]
    Seduction,
    /// "cua" Cuarentena: quarantine the target for two rounds.
    #[serde(rename = "cua")]
    Quarantine,
    /// "pat" Puerta atrancada: place an obstacle at the target boundary.
    #[serde(rename = "pat")]
    LockedDoor,
    /// "ate" Aterrador: refuse an exchange and look at the offered card.
    #[serde(rename = "ate")]
    Scary,
    /// "ngr" ¡No, gracias!: refuse an exchange.
    #[serde(rename = "ngr")]
    NoThanks,
    /// "fal" ¡Fallaste!: deflect an exchange to the next player.
    #[serde(rename = "fal")]
    Missed,
    /// "eaf" ¿Es aquí la fiesta?: lift every quarantine.
    #[serde(rename = "eaf")]
    WheresTheParty,
    /// "vyv" Vuelta y vuelta: pairwise group seat rotation.
    #[serde(rename = "vyv")]
    RoundAndRound,
    /// "cpo" Cuerda podrida: clear all obstacles.
    #[serde(rename = "cpo")]
    RottenRope,
    /// "inf" ¡Infectado!: infection marker, transfers by exchange only.
    #[serde(rename = "inf")]
    Infection,
    /// "tth" La Cosa: the hidden-role marker, never playable.
    #[serde(rename = "tth")]
    TheThing,
    /// "def" filler card with no effect beyond the discard.
    #[serde(rename = "def")]
    Filler,
}

impl CardCode {
    /// The three-letter wire code for this card family.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flamethrower => "lla",
            Self::Analysis => "ana",
            Self::Suspicion => "sos",
            Self::Whisky => "whk",
            Self::ChangePlaces => "cdl",
            Self::RunAway => "mvc",
            Self::WatchYourBack => "vte",
            Self::Seduction => "sed",
            Self::Quarantine => "cua",
            Self::LockedDoor => "pat",
            Self::Scary => "ate",
            Self::NoThanks => "ngr",
            Self::Missed => "fal",
            Self::WheresTheParty => "eaf",
            Self::RoundAndRound => "vyv",
            Self::RottenRope => "cpo",
            Self::Infection => "inf",
            Self::TheThing => "tth",
            Self::Filler => "def",
        }
    }

    /// Whether playing this card needs a target seat. The table-wide panic
    /// cards and the filler resolve with no target; the self-target policy
    /// for `whk`/`vte` lives in [`crate::domain::rules::RuleConfig`].
    pub const fn requires_target(&self) -> bool {
        !matches!(
            self,
            Self::WheresTheParty | Self::RoundAndRound | Self::RottenRope | Self::Filler
        )
    }
}

/// Card category, driving which validation class applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Action,
    Defense,
    Obstacle,
    Infection,
    Panic,
    TheThing,
}

/// Where a card currently lives.
///
/// Transitions are one-directional (`InDeck` → `InHand` → `Played`) except
/// when the played pile is reshuffled back into the deck on exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    Played,
    InHand,
    InDeck,
}

/// One concrete card inside a game's deck.
///
/// Cards hold the owning player's id rather than a reference; a player's hand
/// is the filtered view `card.player_id == player.id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub code: CardCode,
    pub name: String,
    pub kind: CardKind,
    /// Minimum player count at which this card enters the deck.
    pub number_in_card: u8,
    pub state: CardState,
    pub playable: bool,
    pub player_id: Option<i64>,
}

impl Card {
    pub fn is_in_deck(&self) -> bool {
        self.state == CardState::InDeck
    }

    pub fn is_played(&self) -> bool {
        self.state == CardState::Played
    }
}

/// One entry of the static card set: a card family at a player-count tier.
#[derive(Debug, Clone, Copy)]
pub struct CardSpec {
    pub code: CardCode,
    pub name: &'static str,
    pub kind: CardKind,
    /// Minimum player count for deck inclusion.
    pub number_in_card: u8,
    /// Copies added to the deck once the tier is reached.
    pub amount_in_deck: u8,
    pub playable: bool,
}

const fn spec(
    code: CardCode,
    name: &'static str,
    kind: CardKind,
    number_in_card: u8,
    amount_in_deck: u8,
    playable: bool,
) -> CardSpec {
    CardSpec {
        code,
        name,
        kind,
        number_in_card,
        amount_in_deck,
        playable,
    }
}

/// The full static card set. Deck seeding filters by
/// `number_in_card <= player_count` and creates `amount_in_deck` copies per
/// entry. Exactly one The Thing card exists at tier 0 so every deck gets it.
pub static CARD_SET: &[CardSpec] = &[
    spec(CardCode::TheThing, "La Cosa", CardKind::TheThing, 0, 1, false),
    // Action cards
    spec(CardCode::Flamethrower, "Lanzallamas", CardKind::Action, 4, 2, true),
    spec(CardCode::Flamethrower, "Lanzallamas", CardKind::Action, 6, 1, true),
    spec(CardCode::Flamethrower, "Lanzallamas", CardKind::Action, 9, 1, true),
    spec(CardCode::Flamethrower, "Lanzallamas", CardKind::Action, 11, 1, true),
    spec(CardCode::Analysis, "Análisis", CardKind::Action, 4, 1, true),
    spec(CardCode::Analysis, "Análisis", CardKind::Action, 6, 1, true),
    spec(CardCode::Analysis, "Análisis", CardKind::Action, 9, 1, true),
    spec(CardCode::Suspicion, "Sospecha", CardKind::Action, 4, 4, true),
    spec(CardCode::Suspicion, "Sospecha", CardKind::Action, 7, 2, true),
    spec(CardCode::Suspicion, "Sospecha", CardKind::Action, 10, 2, true),
    spec(CardCode::Whisky, "Whisky", CardKind::Action, 4, 1, true),
    spec(CardCode::Whisky, "Whisky", CardKind::Action, 7, 1, true),
    spec(CardCode::Whisky, "Whisky", CardKind::Action, 10, 1, true),
    spec(CardCode::ChangePlaces, "¡Cambio de lugar!", CardKind::Action, 4, 2, true),
    spec(CardCode::ChangePlaces, "¡Cambio de lugar!", CardKind::Action, 7, 1, true),
    spec(CardCode::ChangePlaces, "¡Cambio de lugar!", CardKind::Action, 9, 1, true),
    spec(CardCode::ChangePlaces, "¡Cambio de lugar!", CardKind::Action, 11, 1, true),
    spec(CardCode::RunAway, "¡Más vale que corras!", CardKind::Action, 4, 2, true),
    spec(CardCode::RunAway, "¡Más vale que corras!", CardKind::Action, 7, 1, true),
    spec(CardCode::RunAway, "¡Más vale que corras!", CardKind::Action, 11, 1, true),
    spec(CardCode::WatchYourBack, "Vigila tus espaldas", CardKind::Action, 4, 1, true),
    spec(CardCode::WatchYourBack, "Vigila tus espaldas", CardKind::Action, 9, 1, true),
    spec(CardCode::WatchYourBack, "Vigila tus espaldas", CardKind::Action, 11, 1, true),
    spec(CardCode::Seduction, "¡Seducción!", CardKind::Action, 4, 2, true),
    spec(CardCode::Seduction, "¡Seducción!", CardKind::Action, 6, 1, true),
    spec(CardCode::Seduction, "¡Seducción!", CardKind::Action, 8, 1, true),
    spec(CardCode::Seduction, "¡Seducción!", CardKind::Action, 10, 1, true),
    spec(CardCode::Seduction, "¡Seducción!", CardKind::Action, 12, 1, true),
    spec(CardCode::Quarantine, "Cuarentena", CardKind::Action, 5, 1, true),
    spec(CardCode::Quarantine, "Cuarentena", CardKind::Action, 9, 1, true),
    spec(CardCode::Quarantine, "Cuarentena", CardKind::Action, 11, 1, true),
    // Obstacle
    spec(CardCode::LockedDoor, "Puerta atrancada", CardKind::Obstacle, 4, 1, true),
    spec(CardCode::LockedDoor, "Puerta atrancada", CardKind::Obstacle, 7, 1, true),
    spec(CardCode::LockedDoor, "Puerta atrancada", CardKind::Obstacle, 11, 1, true),
    // Defense cards
    spec(CardCode::Scary, "Aterrador", CardKind::Defense, 4, 1, true),
    spec(CardCode::Scary, "Aterrador", CardKind::Defense, 6, 1, true),
    spec(CardCode::Scary, "Aterrador", CardKind::Defense, 8, 1, true),
    spec(CardCode::Scary, "Aterrador", CardKind::Defense, 11, 1, true),
    spec(CardCode::NoThanks, "¡No, gracias!", CardKind::Defense, 4, 1, true),
    spec(CardCode::NoThanks, "¡No, gracias!", CardKind::Defense, 6, 1, true),
    spec(CardCode::NoThanks, "¡No, gracias!", CardKind::Defense, 8, 1, true),
    spec(CardCode::NoThanks, "¡No, gracias!", CardKind::Defense, 11, 1, true),
    spec(CardCode::Missed, "¡Fallaste!", CardKind::Defense, 4, 1, true),
    spec(CardCode::Missed, "¡Fallaste!", CardKind::Defense, 6, 1, true),
    spec(CardCode::Missed, "¡Fallaste!", CardKind::Defense, 8, 1, true),
    spec(CardCode::Missed, "¡Fallaste!", CardKind::Defense, 11, 1, true),
    // Panic cards
    spec(CardCode::WheresTheParty, "¿Es aquí la fiesta?", CardKind::Panic, 5, 1, true),
    spec(CardCode::WheresTheParty, "¿Es aquí la fiesta?", CardKind::Panic, 9, 1, true),
    spec(CardCode::RoundAndRound, "Vuelta y vuelta", CardKind::Panic, 4, 1, true),
    spec(CardCode::RoundAndRound, "Vuelta y vuelta", CardKind::Panic, 8, 1, true),
    spec(CardCode::RoundAndRound, "Vuelta y vuelta", CardKind::Panic, 11, 1, true),
    spec(CardCode::RottenRope, "Cuerda podrida", CardKind::Panic, 4, 1, true),
    spec(CardCode::RottenRope, "Cuerda podrida", CardKind::Panic, 6, 1, true),
    spec(CardCode::RottenRope, "Cuerda podrida", CardKind::Panic, 9, 1, true),
    spec(CardCode::RottenRope, "Cuerda podrida", CardKind::Panic, 12, 1, true),
    // Infection markers only move between hands by exchange
    spec(CardCode::Infection, "¡Infectado!", CardKind::Infection, 4, 8, false),
    spec(CardCode::Infection, "¡Infectado!", CardKind::Infection, 6, 2, false),
    spec(CardCode::Infection, "¡Infectado!", CardKind::Infection, 7, 2, false),
    spec(CardCode::Infection, "¡Infectado!", CardKind::Infection, 8, 2, false),
    spec(CardCode::Infection, "¡Infectado!", CardKind::Infection, 9, 2, false),
    spec(CardCode::Infection, "¡Infectado!", CardKind::Infection, 10, 2, false),
    spec(CardCode::Infection, "¡Infectado!", CardKind::Infection, 11, 3, false),
    // Filler keeps the deck fat enough for long sessions
    spec(CardCode::Filler, "Carta de relleno", CardKind::Action, 4, 6, true),
    spec(CardCode::Filler, "Carta de relleno", CardKind::Action, 6, 4, true),
    spec(CardCode::Filler, "Carta de relleno", CardKind::Action, 8, 4, true),
    spec(CardCode::Filler, "Carta de relleno", CardKind::Action, 10, 4, true),
];

/// Total copies per card family at a given player count, indexed by code.
pub static AMOUNTS_BY_CODE: Lazy<HashMap<CardCode, Vec<&'static CardSpec>>> = Lazy::new(|| {
    let mut map: HashMap<CardCode, Vec<&'static CardSpec>> = HashMap::new();
    for entry in CARD_SET {
        map.entry(entry.code).or_default().push(entry);
    }
    map
});

/// Expected deck size for a player count (sum of `amount_in_deck` over all
/// entries whose tier is reached).
pub fn deck_size_for(player_count: u8) -> usize {
    CARD_SET
        .iter()
        .filter(|s| s.number_in_card <= player_count)
        .map(|s| s.amount_in_deck as usize)
        .sum()
}
