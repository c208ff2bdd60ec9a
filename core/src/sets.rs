use serde::{Deserialize, Serialize};

use crate::models::IntervalTable;

/// Hvilken oppslagstabell som brukes for økt 1–9.
///
/// Planen har historisk hatt to ulike tabeller: `V1` brukes av ukesoversikten
/// (tekstplanen), `V2` av den detaljerte øktgenereringen. Begge beholdes som
/// navngitte strategier; kalleren velger eksplisitt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetCountTable {
    V1,
    #[default]
    V2,
}

const LOOKUP_V1: [u32; 9] = [16, 13, 10, 7, 6, 5, 6, 5, 4];
const LOOKUP_V2: [u32; 9] = [16, 12, 10, 6, 4, 3, 5, 3, 2];

impl SetCountTable {
    /// Fast antall sett for økt 1–9 (uke 1–3).
    pub fn lookup(&self, session_index: u32) -> Option<u32> {
        let table = match self {
            SetCountTable::V1 => &LOOKUP_V1,
            SetCountTable::V2 => &LOOKUP_V2,
        };
        match session_index {
            1..=9 => Some(table[session_index as usize - 1]),
            _ => None,
        }
    }

    /// Antall sett for en økt.
    ///
    /// Sammenhengende løp (run == 0, eller walk == 0 for indeksen i tabellen) gir 1.
    /// Uke 1–3 slås opp, uke 4 er fast, uke 5–7 følger avtrappende formler.
    /// Uker etter 7 (ekstrapolering) bruker taper-formelen.
    pub fn compute_sets(
        &self,
        table: &IntervalTable,
        session_index: u32,
        run_minutes: f64,
        week_number: u32,
    ) -> u32 {
        if run_minutes == 0.0 {
            return 1;
        }
        if let Some(step) = table.step(session_index) {
            if step.is_continuous() {
                return 1;
            }
        }

        if let Some(n) = self.lookup(session_index) {
            return n;
        }

        match week_number {
            4 => match session_index {
                10 => 6,
                11 => 1,
                12 => 5,
                _ => taper_sets(session_index),
            },
            5 => stepped(8.0, 13, 6, session_index),
            6 => stepped(7.0, 16, 5, session_index),
            _ => taper_sets(session_index),
        }
    }
}

/// max(floor, trunc(start - (i - first) * 0.5))
fn stepped(start: f64, first: u32, floor: i64, session_index: u32) -> u32 {
    let base = start - (session_index as f64 - first as f64) * 0.5;
    (base.trunc() as i64).max(floor) as u32
}

fn taper_sets(session_index: u32) -> u32 {
    stepped(5.0, 19, 3, session_index)
}

/// Bekvemmelighet: kanonisk tabell (V2) mot standardprogresjonen.
pub fn compute_sets(session_index: u32, run_minutes: f64, week_number: u32) -> u32 {
    SetCountTable::V2.compute_sets(&IntervalTable::default(), session_index, run_minutes, week_number)
}
