use crate::error::CatalogError;
use crate::model::{
    Ecology, FunctionField, FunctionRule, IngredientRecord, Nature, Origin, UsagePercentages,
};
use serde_json::Map;
use std::str::FromStr;

/// Fixed (non-repeating) fields of the new-ingredient form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub inci: String,
    pub name_ua: String,
    pub origin: Origin,
    pub nature: Nature,
    pub ecology: Ecology,
    pub physical_form: String,
    pub restrictions: String,
    pub usage_gel: String,
    pub usage_cream: String,
    pub usage_tonic: String,
}

/// Addressable fixed field, as typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Inci,
    NameUa,
    Origin,
    Nature,
    Ecology,
    PhysicalForm,
    Restrictions,
    UsageGel,
    UsageCream,
    UsageTonic,
}

impl FormField {
    pub const ALL: &'static [FormField] = &[
        FormField::Inci,
        FormField::NameUa,
        FormField::Origin,
        FormField::Nature,
        FormField::Ecology,
        FormField::PhysicalForm,
        FormField::Restrictions,
        FormField::UsageGel,
        FormField::UsageCream,
        FormField::UsageTonic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Inci => "inci",
            FormField::NameUa => "name_ua",
            FormField::Origin => "origin",
            FormField::Nature => "nature",
            FormField::Ecology => "ecology",
            FormField::PhysicalForm => "physical_form",
            FormField::Restrictions => "restrictions",
            FormField::UsageGel => "usage_gel",
            FormField::UsageCream => "usage_cream",
            FormField::UsageTonic => "usage_tonic",
        }
    }
}

impl FromStr for FormField {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.name() == key)
            .ok_or_else(|| CatalogError::UnknownField(s.to_string()))
    }
}

/// The rule list of a record in progress. Never shorter than one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSlots {
    slots: Vec<FunctionRule>,
}

impl Default for FunctionSlots {
    fn default() -> Self {
        FunctionSlots {
            slots: vec![FunctionRule::blank()],
        }
    }
}

impl FunctionSlots {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Never true: the list keeps at least one slot.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[FunctionRule] {
        &self.slots
    }

    pub fn push_blank(&mut self) {
        self.slots.push(FunctionRule::blank());
    }

    /// Drop the last slot. Returns false, leaving the list untouched, when
    /// only one slot remains.
    pub fn pop(&mut self) -> bool {
        if self.slots.len() <= 1 {
            return false;
        }
        self.slots.pop();
        true
    }

    /// Zero-based access.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut FunctionRule, CatalogError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(CatalogError::SlotOutOfRange {
                index: index + 1,
                len,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Editing,
    Submitted,
}

/// One user's in-progress record. Owned by the caller; dropping it discards
/// the draft.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    form: FormValues,
    functions: FunctionSlots,
    state: BuilderState,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    pub fn new() -> Self {
        RecordBuilder {
            form: FormValues::default(),
            functions: FunctionSlots::default(),
            state: BuilderState::Editing,
        }
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    /// Mutable access to the fixed fields. Counts as an edit.
    pub fn form_mut(&mut self) -> &mut FormValues {
        self.state = BuilderState::Editing;
        &mut self.form
    }

    pub fn functions(&self) -> &[FunctionRule] {
        self.functions.as_slice()
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Set a fixed field from user text. Enumerated fields must name one of
    /// their choices; text fields take the value verbatim, blanks included.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), CatalogError> {
        let form = &mut self.form;
        match field {
            FormField::Inci => form.inci = value.to_string(),
            FormField::NameUa => form.name_ua = value.to_string(),
            FormField::Origin => form.origin = value.parse()?,
            FormField::Nature => form.nature = value.parse()?,
            FormField::Ecology => form.ecology = value.parse()?,
            FormField::PhysicalForm => form.physical_form = value.to_string(),
            FormField::Restrictions => form.restrictions = value.to_string(),
            FormField::UsageGel => form.usage_gel = value.to_string(),
            FormField::UsageCream => form.usage_cream = value.to_string(),
            FormField::UsageTonic => form.usage_tonic = value.to_string(),
        }
        self.state = BuilderState::Editing;
        Ok(())
    }

    /// Set one field of the function at zero-based `index`.
    pub fn set_function_field(
        &mut self,
        index: usize,
        field: FunctionField,
        value: &str,
    ) -> Result<(), CatalogError> {
        let rule = self.functions.get_mut(index)?;
        *rule.field_mut(field) = Some(value.to_string());
        self.state = BuilderState::Editing;
        Ok(())
    }

    /// Replace the whole function at zero-based `index`. Absent fields are
    /// stored as `""`.
    pub fn set_function(&mut self, index: usize, rule: FunctionRule) -> Result<(), CatalogError> {
        *self.functions.get_mut(index)? = rule.filled();
        self.state = BuilderState::Editing;
        Ok(())
    }

    pub fn add_function_slot(&mut self) {
        self.functions.push_blank();
        self.state = BuilderState::Editing;
        tracing::debug!(slots = self.functions.len(), "function slot added");
    }

    /// Remove the last function slot. Refused when it is the only one.
    pub fn remove_function_slot(&mut self) -> bool {
        let removed = self.functions.pop();
        if removed {
            self.state = BuilderState::Editing;
            tracing::debug!(slots = self.functions.len(), "function slot removed");
        } else {
            tracing::warn!("refusing to remove the only function slot");
        }
        removed
    }

    /// Assemble the record from the current form. Blank usage becomes `null`.
    pub fn to_record(&self) -> IngredientRecord {
        let form = &self.form;
        IngredientRecord {
            inci: Some(form.inci.clone()),
            inci_name: None,
            name_ua: Some(form.name_ua.clone()),
            origin: Some(form.origin.to_string()),
            nature: Some(form.nature.to_string()),
            physical_form: Some(form.physical_form.clone()),
            ecology: Some(form.ecology.to_string()),
            restrictions: Some(form.restrictions.clone()),
            usage_percentages: Some(UsagePercentages {
                cleansing_gel: non_blank(&form.usage_gel),
                cream: non_blank(&form.usage_cream),
                tonic: non_blank(&form.usage_tonic),
            }),
            functions: self.functions.as_slice().to_vec(),
            extra: Map::new(),
        }
    }

    /// Serialize the current draft as indented JSON for manual copying.
    ///
    /// The draft is left as is; later edits and another submit produce a
    /// fresh document.
    pub fn submit(&mut self) -> Result<String, CatalogError> {
        let json = serde_json::to_string_pretty(&self.to_record())?;
        self.state = BuilderState::Submitted;
        tracing::debug!(
            inci = %self.form.inci,
            functions = self.functions.len(),
            "record submitted"
        );
        Ok(json)
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builder_has_one_blank_slot() {
        let b = RecordBuilder::new();
        assert_eq!(b.functions(), &[FunctionRule::blank()]);
        assert_eq!(b.state(), BuilderState::Editing);
    }

    #[test]
    fn test_remove_refused_at_one_slot() {
        let mut b = RecordBuilder::new();
        assert!(!b.remove_function_slot());
        assert_eq!(b.functions().len(), 1);
    }

    #[test]
    fn test_add_then_remove_restores_list() {
        let mut b = RecordBuilder::new();
        b.set_function_field(0, FunctionField::Function, "Humectant")
            .unwrap();
        b.add_function_slot();
        b.set_function_field(1, FunctionField::Target, "Hair")
            .unwrap();
        let before = b.functions().to_vec();

        b.add_function_slot();
        assert_eq!(b.functions().len(), 3);
        assert!(b.remove_function_slot());
        assert_eq!(b.functions(), before.as_slice());
    }

    #[test]
    fn test_no_upper_bound_on_slots() {
        let mut b = RecordBuilder::new();
        for _ in 0..50 {
            b.add_function_slot();
        }
        assert_eq!(b.functions().len(), 51);
        while b.remove_function_slot() {}
        assert_eq!(b.functions().len(), 1);
    }

    #[test]
    fn test_out_of_range_slot() {
        let mut b = RecordBuilder::new();
        let err = b
            .set_function_field(3, FunctionField::Target, "Skin")
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::SlotOutOfRange { index: 4, len: 1 }
        ));
    }

    #[test]
    fn test_blank_usage_is_null_and_blank_text_is_empty() {
        let mut b = RecordBuilder::new();
        b.set_field(FormField::UsageCream, "2-5").unwrap();
        let json = b.submit().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["INCI"], "");
        assert_eq!(value["Restrictions"], "");
        assert!(value["Usage_Percentages"]["Cleansing_Gel"].is_null());
        assert_eq!(value["Usage_Percentages"]["Cream"], "2-5");
        assert!(value["Usage_Percentages"]["Tonic"].is_null());
        assert!(value.get("INCI Name").is_none());
    }

    #[test]
    fn test_output_field_order_and_indent() {
        let mut b = RecordBuilder::new();
        let json = b.submit().unwrap();
        let keys = [
            "\"INCI\"",
            "\"Name_UA\"",
            "\"Origin\"",
            "\"Nature\"",
            "\"Physical_Form\"",
            "\"Ecology\"",
            "\"Restrictions\"",
            "\"Usage_Percentages\"",
            "\"Functions\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.starts_with("{\n  \"INCI\": \"\","));
    }

    #[test]
    fn test_non_ascii_kept_literal() {
        let mut b = RecordBuilder::new();
        b.set_field(FormField::NameUa, "Гліцерин").unwrap();
        let json = b.submit().unwrap();
        assert!(json.contains("\"Name_UA\": \"Гліцерин\""));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_submit_round_trips_form_state() {
        let mut b = RecordBuilder::new();
        b.set_field(FormField::Inci, "Niacinamide").unwrap();
        b.set_field(FormField::Nature, "inorganic").unwrap();
        b.set_field(FormField::UsageGel, "1").unwrap();
        b.set_function_field(0, FunctionField::IfPercent, "2-5")
            .unwrap();
        let json = b.submit().unwrap();
        let parsed: IngredientRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, b.to_record());
        assert_eq!(parsed.nature.as_deref(), Some("Inorganic"));
        assert_eq!(parsed.origin.as_deref(), Some("Natural"));
    }

    #[test]
    fn test_replaced_function_never_serializes_null() {
        let mut b = RecordBuilder::new();
        b.set_function(0, FunctionRule::default()).unwrap();
        assert_eq!(b.functions(), &[FunctionRule::blank()]);

        let json = b.submit().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rule = &value["Functions"][0];
        for key in ["IF_Percent", "IF_pH", "Target", "Function"] {
            assert_eq!(rule[key], "", "field {key}");
        }
        assert!(!json.contains("\"IF_Percent\": null"));
    }

    #[test]
    fn test_state_cycles_between_editing_and_submitted() {
        let mut b = RecordBuilder::new();
        let first = b.submit().unwrap();
        assert_eq!(b.state(), BuilderState::Submitted);

        b.set_field(FormField::Inci, "Aqua").unwrap();
        assert_eq!(b.state(), BuilderState::Editing);

        let second = b.submit().unwrap();
        assert_ne!(first, second);
        assert!(second.contains("\"INCI\": \"Aqua\""));
        assert_eq!(b.form().inci, "Aqua");
    }

    #[test]
    fn test_invalid_choice_leaves_form_unchanged() {
        let mut b = RecordBuilder::new();
        b.set_field(FormField::Origin, "synthetic").unwrap();
        assert!(b.set_field(FormField::Origin, "mineral").is_err());
        assert_eq!(b.form().origin, Origin::Synthetic);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut a = RecordBuilder::new();
        let b = RecordBuilder::new();
        a.add_function_slot();
        a.set_function_field(1, FunctionField::Function, "Emollient")
            .unwrap();
        assert_eq!(a.functions().len(), 2);
        assert_eq!(b.functions().len(), 1);
    }

    #[test]
    fn test_form_field_names() {
        assert_eq!("name-ua".parse::<FormField>().unwrap(), FormField::NameUa);
        assert_eq!(
            "USAGE_TONIC".parse::<FormField>().unwrap(),
            FormField::UsageTonic
        );
        assert!("colour".parse::<FormField>().is_err());
    }
}
