//! Table combination selection
//!
//! Pure functions over a candidate table set. Callers pass tables in a
//! stable iteration order (capacity ascending, then id); everything here is
//! deterministic with respect to that order and touches no I/O.
//!
//! Seating policy:
//! - parties up to [`SMALL_PARTY_MAX`] guests take the smallest single table
//!   that fits;
//! - larger parties prefer a single table within `[n, 1.5n]` capacity, then
//!   pairs, then triples.

use serde::{Deserialize, Serialize};
use shared::models::DiningTable;

/// Largest party that books a single table without the capacity band
pub const SMALL_PARTY_MAX: i32 = 4;

/// How `auto_select` picks among viable seatings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// First satisfying combination in iteration order
    #[default]
    FirstFit,
    /// Combination with the least summed-capacity excess; ties fall back
    /// to iteration order
    MinimalWaste,
}

impl std::str::FromStr for SelectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_fit" => Ok(SelectionStrategy::FirstFit),
            "minimal_waste" => Ok(SelectionStrategy::MinimalWaste),
            other => Err(format!("Unknown selection strategy: {other}")),
        }
    }
}

/// Every viable seating for a party, grouped by table count. Each entry's
/// summed capacity covers the party.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableCombinations {
    pub single: Vec<DiningTable>,
    pub double: Vec<[DiningTable; 2]>,
    pub triple: Vec<[DiningTable; 3]>,
}

impl TableCombinations {
    pub fn is_empty(&self) -> bool {
        self.single.is_empty() && self.double.is_empty() && self.triple.is_empty()
    }
}

fn capacity(tables: &[&DiningTable]) -> i32 {
    tables.iter().map(|t| t.capacity).sum()
}

/// Whether a single table sits in the large-party band `[n, 1.5n]`.
/// Integer form: `n <= cap && 2*cap <= 3*n`.
fn in_band(cap: i32, guest_count: i32) -> bool {
    cap >= guest_count && 2 * cap <= 3 * guest_count
}

/// Enumerate all combinations of 1–3 tables whose summed capacity covers
/// the party, in iteration order (pairs and triples by ascending index).
pub fn select_combinations(tables: &[DiningTable], guest_count: i32) -> TableCombinations {
    let mut result = TableCombinations::default();
    if guest_count <= 0 {
        return result;
    }

    for table in tables {
        if table.capacity >= guest_count {
            result.single.push(table.clone());
        }
    }

    for i in 0..tables.len() {
        for j in (i + 1)..tables.len() {
            if tables[i].capacity + tables[j].capacity >= guest_count {
                result.double.push([tables[i].clone(), tables[j].clone()]);
            }
        }
    }

    for i in 0..tables.len() {
        for j in (i + 1)..tables.len() {
            for k in (j + 1)..tables.len() {
                if tables[i].capacity + tables[j].capacity + tables[k].capacity >= guest_count {
                    result
                        .triple
                        .push([tables[i].clone(), tables[j].clone(), tables[k].clone()]);
                }
            }
        }
    }

    result
}

/// Pick one seating for the party, or `None` when no eligible combination of
/// up to three tables covers it.
///
/// Small parties (≤ 4) take the smallest single table that fits. Larger
/// parties only take a single table within `[n, 1.5n]` so one big table is
/// not burned on a medium group; an oversized single is never selected for
/// them. When no single qualifies the search widens to pairs, then triples,
/// under the configured strategy.
pub fn auto_select<'a>(
    tables: &'a [DiningTable],
    guest_count: i32,
    strategy: SelectionStrategy,
) -> Option<Vec<&'a DiningTable>> {
    if guest_count <= 0 {
        return None;
    }

    let single: Option<&DiningTable> = if guest_count <= SMALL_PARTY_MAX {
        tables
            .iter()
            .filter(|t| t.capacity >= guest_count)
            .min_by_key(|t| t.capacity)
    } else {
        match strategy {
            SelectionStrategy::FirstFit => tables.iter().find(|t| in_band(t.capacity, guest_count)),
            SelectionStrategy::MinimalWaste => tables
                .iter()
                .filter(|t| in_band(t.capacity, guest_count))
                .min_by_key(|t| t.capacity),
        }
    };
    if let Some(t) = single {
        return Some(vec![t]);
    }

    // Pairs, then triples
    if let Some(pair) = pick_pair(tables, guest_count, strategy) {
        return Some(pair);
    }
    pick_triple(tables, guest_count, strategy)
}

fn pick_pair<'a>(
    tables: &'a [DiningTable],
    guest_count: i32,
    strategy: SelectionStrategy,
) -> Option<Vec<&'a DiningTable>> {
    let mut best: Option<Vec<&DiningTable>> = None;
    for i in 0..tables.len() {
        for j in (i + 1)..tables.len() {
            let candidate = vec![&tables[i], &tables[j]];
            if capacity(&candidate) < guest_count {
                continue;
            }
            match strategy {
                SelectionStrategy::FirstFit => return Some(candidate),
                SelectionStrategy::MinimalWaste => {
                    if best
                        .as_ref()
                        .is_none_or(|b| capacity(&candidate) < capacity(b))
                    {
                        best = Some(candidate);
                    }
                }
            }
        }
    }
    best
}

fn pick_triple<'a>(
    tables: &'a [DiningTable],
    guest_count: i32,
    strategy: SelectionStrategy,
) -> Option<Vec<&'a DiningTable>> {
    let mut best: Option<Vec<&DiningTable>> = None;
    for i in 0..tables.len() {
        for j in (i + 1)..tables.len() {
            for k in (j + 1)..tables.len() {
                let candidate = vec![&tables[i], &tables[j], &tables[k]];
                if capacity(&candidate) < guest_count {
                    continue;
                }
                match strategy {
                    SelectionStrategy::FirstFit => return Some(candidate),
                    SelectionStrategy::MinimalWaste => {
                        if best
                            .as_ref()
                            .is_none_or(|b| capacity(&candidate) < capacity(b))
                        {
                            best = Some(candidate);
                        }
                    }
                }
            }
        }
    }
    best
}
