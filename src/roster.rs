use crate::errors::{RosterError, RosterResult};
use crate::fighter::{apply_class_modifiers, validate_template};
use schema::FighterTemplate;
use std::collections::HashMap;
use std::path::Path;

/// The bundled roster, embedded at compile time.
const BUILTIN_ROSTER: &str = include_str!("../data/fighters.ron");

/// A named set of fighters ready for battle.
///
/// Entries keep their file order, which is also bracket seeding order.
/// Class modifiers have already been applied to every template.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    fighters: Vec<FighterTemplate>,
    by_name: HashMap<String, usize>,
}

impl Roster {
    /// Builds a roster from base definitions, applying class modifiers once.
    pub fn from_base_templates(base: Vec<FighterTemplate>) -> RosterResult<Self> {
        let mut fighters = Vec::with_capacity(base.len());
        let mut by_name = HashMap::with_capacity(base.len());

        for template in &base {
            let fighter = apply_class_modifiers(template);
            validate_template(&fighter)?;
            if by_name.insert(fighter.name.clone(), fighters.len()).is_some() {
                return Err(RosterError::DuplicateFighter(fighter.name));
            }
            fighters.push(fighter);
        }

        Ok(Self { fighters, by_name })
    }

    pub fn from_ron_str(text: &str) -> RosterResult<Self> {
        let base: Vec<FighterTemplate> = ron::from_str(text)?;
        Self::from_base_templates(base)
    }

    pub fn load(path: impl AsRef<Path>) -> RosterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::from_ron_str(&text)?;
        tracing::debug!(path = %path.display(), fighters = roster.len(), "roster loaded");
        Ok(roster)
    }

    /// Cheetah, Retro, Pixel, Nova and Blaze.
    pub fn builtin() -> RosterResult<Self> {
        Self::from_ron_str(BUILTIN_ROSTER)
    }

    pub fn get(&self, name: &str) -> RosterResult<&FighterTemplate> {
        self.by_name
            .get(name)
            .map(|&index| &self.fighters[index])
            .ok_or_else(|| RosterError::UnknownFighter(name.to_string()))
    }

    /// Looks up several fighters at once, preserving the requested order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> RosterResult<Vec<FighterTemplate>> {
        names
            .iter()
            .map(|name| self.get(name.as_ref()).cloned())
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fighters.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FighterTemplate> {
        self.fighters.iter()
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a FighterTemplate;
    type IntoIter = std::slice::Iter<'a, FighterTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.fighters.iter()
    }
}
