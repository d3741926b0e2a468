//! Combat resolution table.

use crate::types::{CombatResult, Rank};

/// Resolves an attack once both ranks are known. The defender's rank is
/// always revealed by combat, so no hidden state is involved here.
///
/// Special cases, in precedence order:
/// - a Flag defender always falls (the game-winning capture)
/// - a Spy attacking the Marshal wins; the Spy has no such power on defense
/// - a Bomb defender destroys every attacker except a Miner
pub fn resolve_combat(attacker: Rank, defender: Rank) -> CombatResult {
    if defender == Rank::Flag {
        return CombatResult::AttackerWins;
    }
    if attacker == Rank::Spy && defender == Rank::Marshal {
        return CombatResult::AttackerWins;
    }
    if defender == Rank::Bomb {
        return if attacker == Rank::Miner {
            CombatResult::AttackerWins
        } else {
            CombatResult::DefenderWins
        };
    }

    match attacker.strength().cmp(&defender.strength()) {
        std::cmp::Ordering::Greater => CombatResult::AttackerWins,
        std::cmp::Ordering::Equal => CombatResult::BothDie,
        std::cmp::Ordering::Less => CombatResult::DefenderWins,
    }
}

#[cfg(test)]
#[path = "combat_tests.rs"]
mod combat_tests;
