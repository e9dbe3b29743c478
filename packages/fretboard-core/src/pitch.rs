//! # Pitch Model
//!
//! Chromatic pitch classes and concrete pitches with equal-tempered frequencies.
//!
//! ## Naming
//! - Sharps are canonical: `C C# D D# E F F# G G# A A# B`
//! - Flats are accepted when parsing (`"Bb"` parses as `A#`)
//! - A pitch is a class plus a scientific octave: `"E1"`, `"F#2"`, `"Bb0"`
//!
//! ## Frequencies
//! MIDI numbering with C4 = 60 and A4 = 69 = 440 Hz.
//! - E1 (open low string of a bass) = MIDI 28 ≈ 41.20 Hz
//! - G2 (open high string of a bass) = MIDI 43 ≈ 98.00 Hz
//!
//! ## Related Modules
//! - `catalog` - Builds fretboards from open-string pitches

use crate::error::FretboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the twelve chromatic pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "B")]
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitones above C (0-11)
    pub fn semitone(self) -> u8 {
        self as u8
    }

    pub fn from_semitone(semitone: i32) -> Self {
        Self::ALL[semitone.rem_euclid(12) as usize]
    }

    /// The class `semitones` half steps above this one
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitone(self.semitone() as i32 + semitones)
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = FretboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let base: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(FretboardError::UnknownPitch(s.to_string())),
        };
        let accidental = match chars.as_str() {
            "" => 0,
            "#" | "♯" => 1,
            "b" | "♭" => -1,
            _ => return Err(FretboardError::UnknownPitch(s.to_string())),
        };
        Ok(Self::from_semitone(base + accidental))
    }
}

/// A pitch class in a specific octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i8,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    /// MIDI note number (C4 = 60)
    pub fn midi(self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.class.semitone() as i32
    }

    pub fn from_midi(midi: i32) -> Self {
        Self {
            class: PitchClass::from_semitone(midi),
            octave: (midi.div_euclid(12) - 1) as i8,
        }
    }

    /// Equal-tempered frequency in Hz, A4 = 440
    pub fn frequency(self) -> f64 {
        440.0 * 2f64.powf((self.midi() - 69) as f64 / 12.0)
    }

    /// The pitch `semitones` half steps above this one
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_midi(self.midi() + semitones)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = FretboardError;

    /// Parse names like `"E1"`, `"F#2"`, `"Bb0"` or `"C-1"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(|| FretboardError::UnknownPitch(s.to_string()))?;
        let (class, octave) = trimmed.split_at(split);
        let class = class
            .parse::<PitchClass>()
            .map_err(|_| FretboardError::UnknownPitch(s.to_string()))?;
        let octave = octave
            .parse::<i8>()
            .map_err(|_| FretboardError::UnknownPitch(s.to_string()))?;
        Ok(Self { class, octave })
    }
}

impl Serialize for Pitch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pitch {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pitch_classes() {
        assert_eq!("C".parse::<PitchClass>().unwrap(), PitchClass::C);
        assert_eq!("F#".parse::<PitchClass>().unwrap(), PitchClass::FSharp);
        assert_eq!("Bb".parse::<PitchClass>().unwrap(), PitchClass::ASharp);
        assert_eq!("Cb".parse::<PitchClass>().unwrap(), PitchClass::B);
        assert_eq!(" e ".parse::<PitchClass>().unwrap(), PitchClass::E);
        assert!("H".parse::<PitchClass>().is_err());
        assert!("C##".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_parse_pitches() {
        assert_eq!("E1".parse::<Pitch>().unwrap(), Pitch::new(PitchClass::E, 1));
        assert_eq!("F#2".parse::<Pitch>().unwrap(), Pitch::new(PitchClass::FSharp, 2));
        assert_eq!("C-1".parse::<Pitch>().unwrap().midi(), 0);
        assert!("E".parse::<Pitch>().is_err());
        assert!("X1".parse::<Pitch>().is_err());
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(Pitch::new(PitchClass::C, 4).midi(), 60);
        assert_eq!(Pitch::new(PitchClass::A, 4).midi(), 69);
        assert_eq!(Pitch::new(PitchClass::E, 1).midi(), 28);
        assert_eq!(Pitch::from_midi(28), Pitch::new(PitchClass::E, 1));
        assert_eq!(Pitch::new(PitchClass::B, 1).transpose(1), Pitch::new(PitchClass::C, 2));
    }

    #[test]
    fn test_frequencies() {
        assert!((Pitch::new(PitchClass::A, 4).frequency() - 440.0).abs() < 1e-9);
        assert!((Pitch::new(PitchClass::E, 1).frequency() - 41.2034).abs() < 1e-3);
        assert!((Pitch::new(PitchClass::G, 2).frequency() - 97.9989).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_serializes_as_name() {
        let json = serde_json::to_string(&Pitch::new(PitchClass::ASharp, 1)).unwrap();
        assert_eq!(json, "\"A#1\"");
        let class = serde_json::to_string(&PitchClass::FSharp).unwrap();
        assert_eq!(class, "\"F#\"");
    }
}
