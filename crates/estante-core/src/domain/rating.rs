use serde::{Deserialize, Serialize};
use std::fmt;

/// Valoración entera en la escala `[0, 5]`.
///
/// `0` significa "sin valorar"; el backend guarda el mismo entero. La
/// invariante se garantiza en el constructor: no existe forma de obtener un
/// `Rating` fuera de rango, ni construyéndolo ni deserializándolo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
  /// Valor máximo permitido.
  pub const MAX: u8 = 5;

  /// Crea un `Rating` validado. Devuelve `None` fuera de `[0, 5]`.
  pub fn new(value: u8) -> Option<Self> {
    if value <= Self::MAX { Some(Rating(value)) } else { None }
  }

  pub fn as_u8(&self) -> u8 {
    self.0
  }
}

impl TryFrom<u8> for Rating {
  type Error = String;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Rating::new(value).ok_or_else(|| format!("rating out of range: {value}"))
  }
}

impl From<Rating> for u8 {
  fn from(rating: Rating) -> Self {
    rating.0
  }
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for _ in 0..self.0 {
      write!(f, "★")?;
    }
    for _ in self.0..Self::MAX {
      write!(f, "☆")?;
    }

    Ok(())
  }
}
