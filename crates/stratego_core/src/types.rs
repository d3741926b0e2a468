use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamColor {
    Red,
    Blue,
}

impl TeamColor {
    pub fn other(self) -> TeamColor {
        match self {
            TeamColor::Red => TeamColor::Blue,
            TeamColor::Blue => TeamColor::Red,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            TeamColor::Red => 0,
            TeamColor::Blue => 1,
        }
    }
}

/// Piece ranks in ascending combat strength. Flag and Bomb never move;
/// Spy beats the Marshal only when attacking; Miner defuses Bombs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rank {
    Flag,
    Spy,
    Scout,
    Miner,
    Sergeant,
    Lieutenant,
    Captain,
    Major,
    Colonel,
    General,
    Marshal,
    Bomb,
}

impl Rank {
    pub const ALL: [Rank; 12] = [
        Rank::Flag,
        Rank::Spy,
        Rank::Scout,
        Rank::Miner,
        Rank::Sergeant,
        Rank::Lieutenant,
        Rank::Captain,
        Rank::Major,
        Rank::Colonel,
        Rank::General,
        Rank::Marshal,
        Rank::Bomb,
    ];

    /// Numeric combat strength, 0 (Flag) through 11 (Bomb).
    pub fn strength(self) -> u8 {
        self as u8
    }

    pub fn from_strength(value: u8) -> Option<Rank> {
        Rank::ALL.get(value as usize).copied()
    }

    /// How many pieces of this rank a full 40-piece setup contains.
    pub fn count_in_setup(self) -> usize {
        match self {
            Rank::Flag => 1,
            Rank::Spy => 1,
            Rank::Scout => 8,
            Rank::Miner => 5,
            Rank::Sergeant => 4,
            Rank::Lieutenant => 4,
            Rank::Captain => 4,
            Rank::Major => 3,
            Rank::Colonel => 2,
            Rank::General => 1,
            Rank::Marshal => 1,
            Rank::Bomb => 6,
        }
    }

    pub fn is_movable(self) -> bool {
        !matches!(self, Rank::Flag | Rank::Bomb)
    }

    /// Point value used by the evaluators and move ordering. The Flag dwarfs
    /// everything else; Bomb and Spy are valued above their raw strength for
    /// their tactical utility.
    pub fn material_value(self) -> i32 {
        match self {
            Rank::Flag => 40_000,
            Rank::Spy => 140,
            Rank::Scout => 120,
            Rank::Miner => 230,
            Rank::Sergeant => 300,
            Rank::Lieutenant => 380,
            Rank::Captain => 470,
            Rank::Major => 560,
            Rank::Colonel => 680,
            Rank::General => 860,
            Rank::Marshal => 1100,
            Rank::Bomb => 190,
        }
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.strength()
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Rank, String> {
        Rank::from_strength(value).ok_or_else(|| format!("invalid rank value: {value}"))
    }
}

/// Opaque per-side piece identifier. Stable for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub rank: Rank,
    pub row: u8,
    pub col: u8,
    pub revealed: bool,
}

/// A move is a pure description; applying it is a separate state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub piece: PieceId,
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    pub attacker_rank: Rank,
    pub defender_rank: Option<Rank>,
    pub is_attack: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatResult {
    AttackerWins,
    DefenderWins,
    BothDie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Setup,
    Playing,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    FlagCaptured,
    NoMoves,
}

/// AI difficulty tier. Selects both the opponent setup style and the
/// search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Medium,
    Hard,
    Extreme,
}

/// One entry of the append-only move log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub turn: u32,
    pub color: TeamColor,
    pub piece: PieceId,
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    pub combat_result: Option<CombatResult>,
    pub attacker_rank: Rank,
    pub defender_rank: Option<Rank>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
