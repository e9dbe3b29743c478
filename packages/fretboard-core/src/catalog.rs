//! # Note Catalog
//!
//! Read-only description of a fretboard: for each string, the notes found at frets
//! `1..=N` with their playback frequencies.
//!
//! ## Layout
//! ```text
//! NoteCatalog
//!   └── Vec<StringData>          (top to bottom as displayed)
//!         ├── open: Pitch        (open-string pitch, e.g. G2)
//!         └── Vec<CatalogEntry>  (index 0 = fret 1)
//!               ├── note: PitchClass
//!               ├── frequency: f64 (Hz)
//!               └── position: usize (fret number)
//! ```
//!
//! The open string (fret 0) is not playable on the board.
//!
//! ## Lookups
//! - [`NoteCatalog::lookup`] - `(string, fret)` to entry in O(1)
//! - [`NoteCatalog::find_first`] - first position carrying a note, in catalog order
//! - [`NoteCatalog::occurrences`] - how many positions carry a note
//!
//! ## Related Modules
//! - `pitch` - Pitch classes and frequencies
//! - `round` - Draws targets from [`NoteCatalog::positions`]

use crate::error::FretboardError;
use crate::pitch::{Pitch, PitchClass};
use serde::{Deserialize, Serialize};

/// Frets per string on the standard board
pub const STANDARD_FRETS: usize = 12;

/// Octave range accepted for open strings, C-1 to B8
pub const OPEN_STRING_OCTAVES: std::ops::RangeInclusive<i8> = -1..=8;

/// A playable location on the fretboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub string_index: usize,
    /// 1-based fret number
    pub fret_index: usize,
}

impl Position {
    pub fn new(string_index: usize, fret_index: usize) -> Self {
        Self {
            string_index,
            fret_index,
        }
    }
}

/// One fret on one string
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub note: PitchClass,
    pub frequency: f64,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringData {
    pub open: Pitch,
    pub notes: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteCatalog {
    strings: Vec<StringData>,
}

impl NoteCatalog {
    /// Build a catalog from open-string pitches, fret `k` sounding `k` semitones above
    /// its open string.
    ///
    /// # Errors
    /// [`FretboardError::InvalidTuning`] when there are no strings or no frets, or an
    /// open string lies outside [`OPEN_STRING_OCTAVES`].
    pub fn from_tuning(open_strings: &[Pitch], frets: usize) -> Result<Self, FretboardError> {
        if open_strings.is_empty() {
            return Err(FretboardError::InvalidTuning(
                "at least one string is required".to_string(),
            ));
        }
        if frets == 0 {
            return Err(FretboardError::InvalidTuning(
                "at least one fret is required".to_string(),
            ));
        }
        if let Some(open) = open_strings
            .iter()
            .find(|open| !OPEN_STRING_OCTAVES.contains(&open.octave))
        {
            return Err(FretboardError::InvalidTuning(format!(
                "open string {} is outside octaves {} to {}",
                open,
                OPEN_STRING_OCTAVES.start(),
                OPEN_STRING_OCTAVES.end()
            )));
        }

        Ok(Self::build(open_strings, frets))
    }

    /// Four-string bass in standard tuning, G2 D2 A1 E1 from the top, 12 frets
    pub fn standard_bass() -> Self {
        Self::build(&standard_tuning(), STANDARD_FRETS)
    }

    fn build(open_strings: &[Pitch], frets: usize) -> Self {
        let strings = open_strings
            .iter()
            .map(|&open| StringData {
                open,
                notes: (1..=frets)
                    .map(|fret| {
                        let pitch = open.transpose(fret as i32);
                        CatalogEntry {
                            note: pitch.class,
                            frequency: pitch.frequency(),
                            position: fret,
                        }
                    })
                    .collect(),
            })
            .collect();
        Self { strings }
    }

    pub fn strings(&self) -> &[StringData] {
        &self.strings
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Frets on the given string (0 when the string does not exist)
    pub fn fret_count(&self, string_index: usize) -> usize {
        self.strings
            .get(string_index)
            .map(|s| s.notes.len())
            .unwrap_or(0)
    }

    pub fn string_label(&self, string_index: usize) -> Option<Pitch> {
        self.strings.get(string_index).map(|s| s.open)
    }

    pub fn lookup(&self, position: Position) -> Option<&CatalogEntry> {
        let fret = position.fret_index.checked_sub(1)?;
        self.strings.get(position.string_index)?.notes.get(fret)
    }

    pub fn note_at(&self, position: Position) -> Option<PitchClass> {
        self.lookup(position).map(|entry| entry.note)
    }

    /// First position carrying `note`, scanning strings top to bottom then frets
    pub fn find_first(&self, note: PitchClass) -> Option<Position> {
        self.positions()
            .find(|&position| self.note_at(position) == Some(note))
    }

    /// Every position in catalog order (string-major)
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.strings
            .iter()
            .enumerate()
            .flat_map(|(string_index, string)| {
                (1..=string.notes.len()).map(move |fret| Position::new(string_index, fret))
            })
    }

    pub fn position_count(&self) -> usize {
        self.strings.iter().map(|s| s.notes.len()).sum()
    }

    pub fn occurrences(&self, note: PitchClass) -> usize {
        self.strings
            .iter()
            .flat_map(|s| s.notes.iter())
            .filter(|entry| entry.note == note)
            .count()
    }
}

impl Default for NoteCatalog {
    fn default() -> Self {
        Self::standard_bass()
    }
}

/// G2 D2 A1 E1
pub fn standard_tuning() -> [Pitch; 4] {
    [
        Pitch::new(PitchClass::G, 2),
        Pitch::new(PitchClass::D, 2),
        Pitch::new(PitchClass::A, 1),
        Pitch::new(PitchClass::E, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_bass_layout() {
        let catalog = NoteCatalog::standard_bass();
        assert_eq!(catalog.string_count(), 4);
        assert_eq!(catalog.position_count(), 48);
        assert_eq!(catalog.string_label(0), Some(Pitch::new(PitchClass::G, 2)));
        assert_eq!(catalog.string_label(3), Some(Pitch::new(PitchClass::E, 1)));

        // Fret 1 on the low E string is F, fret 12 is E an octave up
        let low_f = catalog.lookup(Position::new(3, 1)).unwrap();
        assert_eq!(low_f.note, PitchClass::F);
        assert_eq!(low_f.position, 1);
        assert!((low_f.frequency - 43.6535).abs() < 1e-3);
        let octave = catalog.lookup(Position::new(3, 12)).unwrap();
        assert_eq!(octave.note, PitchClass::E);
        assert!((octave.frequency - 82.4069).abs() < 1e-3);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let catalog = NoteCatalog::standard_bass();
        assert!(catalog.lookup(Position::new(0, 0)).is_none(), "fret 0 is not playable");
        assert!(catalog.lookup(Position::new(0, 13)).is_none());
        assert!(catalog.lookup(Position::new(4, 1)).is_none());
        assert!(catalog.lookup(Position::new(9, 9)).is_none());
    }

    #[test]
    fn test_find_first_scans_in_catalog_order() {
        let catalog = NoteCatalog::standard_bass();
        // G string: G# A A# ... so A is fret 2 on the top string
        assert_eq!(catalog.find_first(PitchClass::A), Some(Position::new(0, 2)));
        // G itself only comes back at fret 12 on the G string
        assert_eq!(catalog.find_first(PitchClass::G), Some(Position::new(0, 12)));
    }

    #[test]
    fn test_standard_bass_occurrences() {
        // Twelve frets cover every class once per string, so every (note, count) pair
        // with count <= 3 is satisfiable on the standard board.
        let catalog = NoteCatalog::standard_bass();
        for class in PitchClass::ALL {
            assert_eq!(catalog.occurrences(class), 4, "{} should appear 4 times", class);
        }
    }

    #[test]
    fn test_short_board_has_unwinnable_targets() {
        // Five frets: some classes appear on fewer than three strings
        let catalog = NoteCatalog::from_tuning(&standard_tuning(), 5).unwrap();
        let counts: Vec<(PitchClass, usize)> = PitchClass::ALL
            .iter()
            .map(|&c| (c, catalog.occurrences(c)))
            .collect();
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 20);
        assert_eq!(catalog.occurrences(PitchClass::A), 2);
        assert_eq!(catalog.occurrences(PitchClass::C), 2);
        assert_eq!(catalog.occurrences(PitchClass::E), 1);
        assert_eq!(catalog.occurrences(PitchClass::F), 2);
    }

    #[test]
    fn test_invalid_tuning() {
        assert!(matches!(
            NoteCatalog::from_tuning(&[], 12),
            Err(FretboardError::InvalidTuning(_))
        ));
        assert!(matches!(
            NoteCatalog::from_tuning(&standard_tuning(), 0),
            Err(FretboardError::InvalidTuning(_))
        ));
        assert!(matches!(
            NoteCatalog::from_tuning(&[Pitch::new(PitchClass::G, 127)], 24),
            Err(FretboardError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_highest_open_string_keeps_rising() {
        let catalog = NoteCatalog::from_tuning(&[Pitch::new(PitchClass::B, 8)], 24).unwrap();
        let notes = &catalog.strings()[0].notes;
        for pair in notes.windows(2) {
            assert!(pair[1].frequency > pair[0].frequency);
        }
        assert_eq!(catalog.lookup(Position::new(0, 24)).unwrap().note, PitchClass::B);
    }

    #[test]
    fn test_positions_are_string_major() {
        let catalog = NoteCatalog::from_tuning(&standard_tuning()[..2], 2).unwrap();
        let positions: Vec<Position> = catalog.positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 1),
                Position::new(1, 2),
            ]
        );
    }
}
