//! Id newtypes. Wrapping every id in its own type means a stockpile id can
//! never be handed to a function expecting an NPC id — the compiler catches
//! what used to be a runtime "ownership reference" bug class.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

id_type!(ObjectId, "Id of a network object (item, resource node, or NPC).");
id_type!(NpcId, "Id of an NPC.");
id_type!(PersonId, "Id of a player-controlled person.");
id_type!(StockpileId, "Id of a stockpile.");
id_type!(HouseId, "Id of a house.");
id_type!(ResourceNodeId, "Id of a resource node.");
