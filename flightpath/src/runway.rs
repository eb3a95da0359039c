use std::{fmt, str::FromStr};

use indexmap::IndexSet;
use nom::{
    Finish, IResult, Parser,
    bytes::complete::take,
    character::complete::{one_of, u8},
    combinator::{all_consuming, map_parser, opt, verify},
};
use serde::Deserialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0:?} is not a runway designator (expected 01-36 with optional L, R or C)")]
pub struct DesignatorError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunwayPosition {
    Left,
    Right,
    Center,
}

impl RunwayPosition {
    const fn letter(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
            Self::Center => 'C',
        }
    }

    const fn from_letter(letter: char) -> Self {
        match letter {
            'L' => Self::Left,
            'R' => Self::Right,
            _ => Self::Center,
        }
    }

    /// Left seen from one end is right seen from the other.
    const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Center => Self::Center,
        }
    }
}

/// One end of a runway strip, e.g. `27L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct RunwayDesignator {
    heading: u8,
    position: Option<RunwayPosition>,
}

impl RunwayDesignator {
    /// The opposite end of the same strip.
    pub fn reciprocal(&self) -> Self {
        Self {
            heading: (self.heading + 17) % 36 + 1,
            position: self.position.map(RunwayPosition::opposite),
        }
    }
}

impl fmt::Display for RunwayDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.heading)?;
        if let Some(position) = self.position {
            write!(f, "{}", position.letter())?;
        }
        Ok(())
    }
}

impl FromStr for RunwayDesignator {
    type Err = DesignatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(nom_runway_designator)
            .parse(s)
            .finish()
            .map(|(_, designator)| designator)
            .map_err(|_| DesignatorError(s.to_owned()))
    }
}

fn nom_heading(input: &str) -> IResult<&str, u8> {
    verify(map_parser(take(2usize), all_consuming(u8)), |heading: &u8| {
        (1..=36).contains(heading)
    })
    .parse(input)
}

fn nom_position(input: &str) -> IResult<&str, RunwayPosition> {
    one_of("LRC").map(RunwayPosition::from_letter).parse(input)
}

pub(crate) fn nom_runway_designator(input: &str) -> IResult<&str, RunwayDesignator> {
    (nom_heading, opt(nom_position))
        .map(|(heading, position)| RunwayDesignator { heading, position })
        .parse(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunwaySide {
    North,
    South,
}

impl RunwaySide {
    pub fn label(self) -> &'static str {
        match self {
            Self::North => "northern",
            Self::South => "southern",
        }
    }
}

/// Which physical strip each runway end belongs to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunwaySides {
    #[serde(default)]
    south: IndexSet<RunwayDesignator>,
    #[serde(default)]
    north: IndexSet<RunwayDesignator>,
}

impl RunwaySides {
    fn lookup(&self, designator: RunwayDesignator) -> Option<RunwaySide> {
        if self.south.contains(&designator) {
            Some(RunwaySide::South)
        } else if self.north.contains(&designator) {
            Some(RunwaySide::North)
        } else {
            None
        }
    }

    /// Unlisted ends are resolved through their reciprocal, anything still
    /// unknown counts as the northern strip.
    pub fn side_of(&self, designator: RunwayDesignator) -> RunwaySide {
        self.lookup(designator)
            .or_else(|| self.lookup(designator.reciprocal()))
            .unwrap_or_else(|| {
                warn!(runway = %designator, "Runway has no configured side, assuming northern");
                RunwaySide::North
            })
    }

    pub fn overlapping(&self) -> impl Iterator<Item = &RunwayDesignator> {
        self.south.intersection(&self.north)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rwy(s: &str) -> RunwayDesignator {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_designators() {
        let runway = rwy("27L");
        assert_eq!(runway.heading, 27);
        assert_eq!(runway.position, Some(RunwayPosition::Left));
        assert_eq!(runway.to_string(), "27L");

        assert_eq!(rwy("09R").to_string(), "09R");
        assert_eq!(rwy("36").position, None);
        assert_eq!(rwy("18C").position, Some(RunwayPosition::Center));
    }

    #[test]
    fn test_reject_invalid_designators() {
        for bad in ["", "9L", "00", "37", "27X", "27LL", "27 L", "L27"] {
            assert_eq!(
                bad.parse::<RunwayDesignator>(),
                Err(DesignatorError(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(rwy("27L").reciprocal(), rwy("09R"));
        assert_eq!(rwy("09L").reciprocal(), rwy("27R"));
        assert_eq!(rwy("18").reciprocal(), rwy("36"));
        assert_eq!(rwy("36").reciprocal(), rwy("18"));
        assert_eq!(rwy("01C").reciprocal(), rwy("19C"));
        assert_eq!(rwy("27R").reciprocal().reciprocal(), rwy("27R"));
    }

    #[test]
    fn test_side_of_uses_reciprocal_when_unlisted() {
        let sides = RunwaySides {
            south: IndexSet::from([rwy("27L")]),
            north: IndexSet::from([rwy("27R")]),
        };
        assert_eq!(sides.side_of(rwy("27L")), RunwaySide::South);
        assert_eq!(sides.side_of(rwy("09R")), RunwaySide::South);
        assert_eq!(sides.side_of(rwy("09L")), RunwaySide::North);
        assert_eq!(sides.side_of(rwy("05")), RunwaySide::North);
        assert_eq!(sides.overlapping().count(), 0);
    }
}
