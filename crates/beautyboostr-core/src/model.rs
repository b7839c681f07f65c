use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// One entry of the ingredient catalog.
///
/// Stored catalogs are hand-edited, so every field is optional and the
/// enumerated fields are kept as plain text here. Absent fields stay absent
/// when a record is written back out, and keys this model does not know
/// (such as the legacy flat `Function`/`Description`) are carried in `extra`.
/// Field order matches the order new records are emitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRecord {
    #[serde(rename = "INCI", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inci: Option<String>,
    /// Name key of the legacy schema. Never populated by the record builder.
    #[serde(rename = "INCI Name", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inci_name: Option<String>,
    #[serde(rename = "Name_UA", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ua: Option<String>,
    #[serde(rename = "Origin", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(rename = "Nature", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature: Option<String>,
    #[serde(rename = "Physical_Form", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_form: Option<String>,
    #[serde(rename = "Ecology", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecology: Option<String>,
    #[serde(rename = "Restrictions", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<String>,
    #[serde(rename = "Usage_Percentages", default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_percentages: Option<UsagePercentages>,
    #[serde(rename = "Functions", default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionRule>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recommended concentration per product category. Blank usage is `null`,
/// so these fields are always written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsagePercentages {
    #[serde(rename = "Cleansing_Gel", default, deserialize_with = "lenient_text")]
    pub cleansing_gel: Option<String>,
    #[serde(rename = "Cream", default, deserialize_with = "lenient_text")]
    pub cream: Option<String>,
    #[serde(rename = "Tonic", default, deserialize_with = "lenient_text")]
    pub tonic: Option<String>,
}

/// A conditional behavior: at `IF_Percent` and `IF_pH`, the ingredient acts
/// as `Function` for `Target`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRule {
    #[serde(rename = "IF_Percent", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_percent: Option<String>,
    #[serde(rename = "IF_pH", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_ph: Option<String>,
    #[serde(rename = "Target", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(rename = "Function", default, deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

/// Free-text field reader. Hand-edited catalogs sometimes hold numbers or
/// booleans (`"IF_pH": 5.5`); those are kept as their JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl FunctionRule {
    /// An empty rule as the builder emits it: every field present and `""`.
    pub fn blank() -> Self {
        FunctionRule {
            if_percent: Some(String::new()),
            if_ph: Some(String::new()),
            target: Some(String::new()),
            function: Some(String::new()),
        }
    }

    /// Replace absent fields with `""`, the form a builder slot always has.
    pub fn filled(self) -> Self {
        let fill = |v: Option<String>| Some(v.unwrap_or_default());
        FunctionRule {
            if_percent: fill(self.if_percent),
            if_ph: fill(self.if_ph),
            target: fill(self.target),
            function: fill(self.function),
        }
    }

    pub fn field_mut(&mut self, field: FunctionField) -> &mut Option<String> {
        match field {
            FunctionField::IfPercent => &mut self.if_percent,
            FunctionField::IfPh => &mut self.if_ph,
            FunctionField::Target => &mut self.target,
            FunctionField::Function => &mut self.function,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionField {
    IfPercent,
    IfPh,
    Target,
    Function,
}

impl FromStr for FunctionField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "if_percent" | "percent" | "%" => Ok(FunctionField::IfPercent),
            "if_ph" | "ph" => Ok(FunctionField::IfPh),
            "target" => Ok(FunctionField::Target),
            "function" => Ok(FunctionField::Function),
            _ => Err(CatalogError::UnknownField(s.to_string())),
        }
    }
}

/// Declares a closed choice list: English label, accepted spellings, default.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $variant:ident => $label:literal [$($alias:literal),*] ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_lowercase();
                $(
                    if lower == $label.to_lowercase() $(|| lower == $alias)* {
                        return Ok($name::$variant);
                    }
                )+
                Err(CatalogError::InvalidChoice {
                    field: $field,
                    value: s.to_string(),
                    expected: $name::ALL
                        .iter()
                        .map(|c| c.label())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        }
    };
}

choice_enum! {
    /// Where the ingredient comes from.
    Origin, "origin" {
        Natural => "Natural" ["натуральне"],
        Synthetic => "Synthetic" ["синтетичне"],
    }
}

choice_enum! {
    Nature, "nature" {
        Organic => "Organic" ["органічна"],
        Inorganic => "Inorganic" ["неорганічна"],
    }
}

choice_enum! {
    Ecology, "ecology" {
        Ecological => "Ecological" ["екологічний"],
        NotEcological => "Not ecological" ["не екологічний", "not_ecological", "not-ecological"],
    }
}
