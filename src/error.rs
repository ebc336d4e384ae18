use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CombatError {
    #[error("Battle still undecided after {rounds} rounds")]
    RoundLimitExceeded { rounds: u32 },

    #[error("Unknown starship type: {0}")]
    UnknownStarshipType(String),

    #[error("Fleet has no starships")]
    EmptyFleet,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_wasm_bindgen::Error> for CombatError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        CombatError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CombatError>;
