//! Quiz Query Handlers

use crate::application::queries::ListCharacters;
use crate::domain::character::Character;

/// ListCharacters Handler
#[derive(Default)]
pub struct ListCharactersHandler;

impl ListCharactersHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, _query: ListCharacters) -> &'static [Character] {
        Character::all()
    }
}
