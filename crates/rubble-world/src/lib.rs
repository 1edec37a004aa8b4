pub mod models;
pub mod palette;
pub mod shapes;

use std::str::FromStr;

use rubble_core::types::TargetCell;

/// Built-in shapes the scene can load or rebuild into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Campus,
    Eagle,
    Cat,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Campus, Model::Eagle, Model::Cat];

    pub fn name(self) -> &'static str {
        match self {
            Model::Campus => "Campus",
            Model::Eagle => "Eagle",
            Model::Cat => "Cat",
        }
    }

    /// Generate the model's cells. `seed` only affects decorative scatter.
    pub fn generate(self, seed: u32) -> Vec<TargetCell> {
        let cells = match self {
            Model::Campus => models::campus(seed),
            Model::Eagle => models::eagle(seed),
            Model::Cat => models::cat(),
        };
        log::debug!("Generated {} with {} cells", self.name(), cells.len());
        cells
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown model '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("eagle".parse::<Model>(), Ok(Model::Eagle));
        assert_eq!("CAMPUS".parse::<Model>(), Ok(Model::Campus));
        assert!("rabbit".parse::<Model>().is_err());
    }

    #[test]
    fn test_every_model_generates() {
        for model in Model::ALL {
            assert!(!model.generate(0).is_empty(), "{} is empty", model.name());
        }
    }
}
