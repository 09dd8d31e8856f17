//! Small bilingual catalog shared by the unit tests.

use crate::catalog::Catalog;
use crate::translations::Translations;

pub(crate) const CATALOG_JSON: &str = r#"{
  "fr": {
    "products": {
      "food": {
        "drinks": {
          "title": "Coca-Cola, Pepsi",
          "euAlternatives": ["Breizh Cola", "Fritz-kola", "Mecca-Cola"],
          "note": "Sodas artisanaux de Bretagne et de Hambourg.",
          "flags": {"popular": true}
        },
        "coffee": {
          "title": "Starbucks, Nespresso",
          "euAlternatives": ["Malongo", "Lavazza"],
          "note": "Torréfacteurs équitables."
        },
        "snacks": {
          "title": "Lay's, Doritos",
          "euAlternatives": ["Brets", "Tyrrells"],
          "note": "",
          "flags": {"new": true}
        }
      },
      "hygiene": {
        "toothpaste": {
          "title": "Colgate, Crest",
          "euAlternatives": ["Elmex", "Signal"],
          "note": "Soins dentaires européens."
        },
        "shampoo": {
          "title": "Pantene, Head & Shoulders",
          "euAlternatives": ["Klorane", "Schwarzkopf"],
          "note": "",
          "flags": {"recommended": true}
        }
      },
      "tech": {
        "audio": {
          "title": "Bose, Beats",
          "euAlternatives": ["Focal", "Sennheiser"],
          "note": "Audio haut de gamme français et allemand.",
          "flags": {"popular": true}
        },
        "phones": {
          "title": "Apple iPhone",
          "euAlternatives": ["Fairphone", "Nokia"],
          "note": "Téléphones réparables."
        }
      }
    }
  },
  "en": {
    "products": {
      "food": {
        "drinks": {
          "title": "Coca-Cola, Pepsi",
          "euAlternatives": ["Breizh Cola", "Fritz-kola", "Mecca-Cola"],
          "note": "Craft sodas from Brittany and Hamburg.",
          "flags": {"popular": true}
        },
        "coffee": {
          "title": "Starbucks, Nespresso",
          "euAlternatives": ["Malongo", "Lavazza"],
          "note": "Fair-trade roasters."
        },
        "snacks": {
          "title": "Lay's, Doritos",
          "euAlternatives": ["Brets", "Tyrrells"],
          "note": "",
          "flags": {"new": true}
        }
      },
      "hygiene": {
        "toothpaste": {
          "title": "Colgate, Crest",
          "euAlternatives": ["Elmex", "Signal"],
          "note": "European oral care."
        },
        "shampoo": {
          "title": "Pantene, Head & Shoulders",
          "euAlternatives": ["Klorane", "Schwarzkopf"],
          "note": "",
          "flags": {"recommended": true}
        }
      },
      "tech": {
        "audio": {
          "title": "Bose, Beats",
          "euAlternatives": ["Focal", "Sennheiser"],
          "note": "High-end audio from France and Germany.",
          "flags": {"popular": true}
        },
        "phones": {
          "title": "Apple iPhone",
          "euAlternatives": ["Fairphone", "Nokia"],
          "note": "Repairable phones."
        }
      }
    }
  }
}"#;

pub(crate) const TRANSLATIONS_YAML: &str = r"
fr:
  categories:
    food: Alimentation
    hygiene: Hygiène
    tech: Technologie
  subcategories:
    food:
      drinks: Boissons gazeuses
      coffee: Café
    tech:
      audio: Audio
en:
  categories:
    food: Food
    hygiene: Hygiene
    tech: Tech
  subcategories:
    food:
      drinks: Soft Drinks
      coffee: Coffee
    tech:
      audio: Audio
";

pub(crate) fn catalog() -> Catalog {
    Catalog::from_json_str(CATALOG_JSON).expect("fixture catalog should parse")
}

pub(crate) fn translations() -> Translations {
    Translations::from_yaml_str(TRANSLATIONS_YAML).expect("fixture translations should parse")
}
