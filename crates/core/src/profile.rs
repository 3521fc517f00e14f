//! Student profile resolution.
//!
//! Maps the selector state (program, semester, optional focus choice) to a
//! [`ResolvedProfile`] via a small static decision table. Resolution is a
//! pure function — no I/O, no session state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semester range offered by the selectors.
pub const SEMESTER_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// A course of study at TH Köln, Campus Gummersbach.
///
/// The "none selected" sentinel lives at the selector layer as
/// `Option<Program>`; everything below here works on a concrete program,
/// so an unrecognized program is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    EngineeringFoundation,
    ElectricalEngineering,
    MechanicalEngineering,
    IndustrialEngineering,
}

impl Program {
    /// All selectable programs, in selector order.
    pub const ALL: [Program; 4] = [
        Program::EngineeringFoundation,
        Program::ElectricalEngineering,
        Program::MechanicalEngineering,
        Program::IndustrialEngineering,
    ];

    /// The official program name. Also the key into the reference catalogs.
    pub fn name(&self) -> &'static str {
        match self {
            Program::EngineeringFoundation => "Ingenieurwissenschaftliches Grundstudium",
            Program::ElectricalEngineering => "Elektrotechnik",
            Program::MechanicalEngineering => "Maschinenbau",
            Program::IndustrialEngineering => "Wirtschaftsingenieurwesen",
        }
    }

    /// Study phase is derived solely from program identity.
    pub fn phase(&self) -> StudyPhase {
        match self {
            Program::EngineeringFoundation => StudyPhase::Foundational,
            _ => StudyPhase::Advanced,
        }
    }

    /// First semester in which a focus area may be chosen.
    /// `None` means the program offers no choice at all.
    pub fn entry_semester(&self) -> Option<u8> {
        match self {
            Program::MechanicalEngineering => Some(5),
            Program::IndustrialEngineering => Some(3),
            _ => None,
        }
    }

    /// The closed set of selectable focus areas for this program.
    pub fn focus_options(&self) -> &'static [&'static str] {
        match self {
            Program::MechanicalEngineering => &["Konstruktion", "Fertigung", "Umwelttechnik"],
            Program::IndustrialEngineering => &["Maschinenbau", "Elektrotechnik", "Umwelttechnik"],
            _ => &[],
        }
    }

    /// Parse selector input: either a 1-based index into [`Program::ALL`]
    /// or a (case-insensitive) program name.
    pub fn parse(input: &str) -> Option<Program> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return Self::ALL.get(n.checked_sub(1)?).copied();
        }
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// "Grundstudium" vs. "Hauptstudium".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyPhase {
    Foundational,
    Advanced,
}

impl StudyPhase {
    pub fn label(&self) -> &'static str {
        match self {
            StudyPhase::Foundational => "Grundstudium",
            StudyPhase::Advanced => "Hauptstudium",
        }
    }
}

impl fmt::Display for StudyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The chosen or pending-eligibility focus area within a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specialization {
    /// No focus area yet ("Noch kein Schwerpunkt").
    None,
    /// The program prescribes a single mandatory track.
    Mandatory(String),
    /// A focus area the student picked from the program's closed set.
    Chosen(String),
    /// Choice opens in a later semester.
    AvailableFrom(u8),
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specialization::None => f.write_str("Noch kein Schwerpunkt"),
            Specialization::Mandatory(label) | Specialization::Chosen(label) => {
                f.write_str(label)
            }
            Specialization::AvailableFrom(semester) => {
                write!(f, "Schwerpunktwahl ab dem {semester}. Semester")
            }
        }
    }
}

/// The derived profile the advisor works with.
///
/// Equality over all fields decides whether the profile summary message is
/// regenerated. `phase` is a pure function of `program`, so this matches
/// equality over the (program, semester, specialization) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProfile {
    pub program: Program,
    pub semester: u8,
    pub specialization: Specialization,
    pub phase: StudyPhase,
}

/// Resolve the selector state into a profile.
///
/// Pure and deterministic. `choice` is the student's focus selection, if
/// any; it only takes effect when the program allows a choice and the
/// semester has reached the program's entry semester. A choice that is not
/// one of the program's options is treated as not chosen — the selectors
/// validate before it ever gets here.
pub fn resolve(program: Program, semester: u8, choice: Option<&str>) -> ResolvedProfile {
    let specialization = match program {
        Program::EngineeringFoundation => Specialization::None,
        Program::ElectricalEngineering => {
            Specialization::Mandatory("Automatisierung (Pflichtschwerpunkt)".into())
        }
        Program::MechanicalEngineering | Program::IndustrialEngineering => {
            let entry = program
                .entry_semester()
                .expect("choice-based programs have an entry semester");
            if semester >= entry {
                match choice.and_then(|c| {
                    program
                        .focus_options()
                        .iter()
                        .find(|opt| opt.eq_ignore_ascii_case(c))
                }) {
                    Some(opt) => Specialization::Chosen((*opt).into()),
                    None => Specialization::None,
                }
            } else {
                Specialization::AvailableFrom(entry)
            }
        }
    };

    ResolvedProfile {
        program,
        semester,
        specialization,
        phase: program.phase(),
    }
}
