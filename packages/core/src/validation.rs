use crate::discipline::DisciplineConfig;
use crate::types::ProjectRecord;

/// Validation errors for submitted project data
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates a normalized record against its discipline page
pub fn validate_record(record: &ProjectRecord, config: &DisciplineConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if record.client.trim().is_empty() {
        errors.push(ValidationError::new("client", "Client name is required"));
    }

    if record.site.trim().is_empty() {
        errors.push(ValidationError::new("site", "Site name is required"));
    }

    if record.supplier.trim().is_empty() {
        errors.push(ValidationError::new("supplier", "Supplier name is required"));
    }

    if record.discipline != config.discipline {
        errors.push(ValidationError::new(
            "discipline",
            format!(
                "Record belongs to {} and cannot be saved as {}",
                record.discipline, config.name
            ),
        ));
    }

    if !record.status.is_canonical() {
        errors.push(ValidationError::new(
            "status",
            "Status must be one of the workflow values",
        ));
    }

    match (record.start_date, record.end_date) {
        (None, _) => errors.push(ValidationError::new("start_date", "Start date is required")),
        (Some(start), Some(end)) if end < start => errors.push(ValidationError::new(
            "end_date",
            "End date cannot precede the start date",
        )),
        _ => {}
    }

    for item in record.matrix.keys() {
        if !config.is_matrix_item(item) {
            errors.push(ValidationError::new(
                "matrix",
                format!("'{}' is not a {} matrix item", item, config.name),
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discipline::Discipline;
    use crate::types::{Party, ProjectRecordInput};
    use crate::workflow::WorkflowStatus;
    use chrono::NaiveDate;

    fn valid_input() -> ProjectRecordInput {
        ProjectRecordInput {
            client: "ACME Corp".to_string(),
            site: "Plant 7".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_record_valid() {
        let config = Discipline::Hidraulica.config();
        let mut input = valid_input();
        input
            .matrix
            .insert("Tubos e conexões".to_string(), Party::Supplier);
        let record = input.into_record(&config);

        assert!(validate_record(&record, &config).is_empty());
    }

    #[test]
    fn test_validate_record_missing_required_fields() {
        let config = Discipline::Dutos.config();
        let record = ProjectRecordInput::default().into_record(&config);

        let errors = validate_record(&record, &config);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["client", "site", "start_date"]);
    }

    #[test]
    fn test_validate_record_rejects_foreign_matrix_item() {
        let config = Discipline::Eletrica.config();
        let mut input = valid_input();
        input.matrix.insert("Bombas".to_string(), Party::Siarcon);
        let record = input.into_record(&config);

        let errors = validate_record(&record, &config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "matrix");
    }

    #[test]
    fn test_validate_record_rejects_unknown_status() {
        let config = Discipline::Tab.config();
        let mut input = valid_input();
        input.status = WorkflowStatus::Draft;
        let record = input.into_record(&config);

        let errors = validate_record(&record, &config);
        assert_eq!(errors, vec![ValidationError::new(
            "status",
            "Status must be one of the workflow values"
        )]);
    }

    #[test]
    fn test_validate_record_rejects_inverted_dates() {
        let config = Discipline::Tab.config();
        let mut input = valid_input();
        input.end_date = NaiveDate::from_ymd_opt(2026, 1, 1);
        let record = input.into_record(&config);

        let errors = validate_record(&record, &config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "end_date");
    }

    #[test]
    fn test_validate_record_rejects_other_discipline() {
        let record = valid_input().into_record(&Discipline::Dutos.config());
        let errors = validate_record(&record, &Discipline::Automacao.config());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "discipline");
    }
}
