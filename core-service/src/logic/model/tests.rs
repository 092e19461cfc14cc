//! Integration Tests for Artifact Loading
//!
//! Loads the sample artifacts shipped in `artifacts/` and runs complete
//! submissions through them.

#[cfg(test)]
mod integration_tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::{tempdir, TempDir};

    use crate::constants::{
        FEATURE_NAMES_FILE, LABEL_ENCODER_FILE, LINEAR_PIPELINE_FILE, MANIFEST_FILE,
        ONNX_PIPELINE_FILE,
    };
    use crate::logic::engine::assess;
    use crate::logic::error::AssessmentError;
    use crate::logic::features::{EmploymentStatus, Gender, RawAssessment, WorkEnvironment};
    use crate::logic::model::artifacts::sha256_hex;
    use crate::logic::model::{load_context, ArtifactPaths, ModelBackend, RiskLevel};

    const SAMPLE_FILES: [&str; 3] = [LABEL_ENCODER_FILE, FEATURE_NAMES_FILE, LINEAR_PIPELINE_FILE];

    fn sample_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("artifacts")
    }

    /// Copy of the sample artifacts that a test may tamper with
    fn scratch_copy() -> TempDir {
        let dir = tempdir().unwrap();
        for name in SAMPLE_FILES {
            fs::copy(sample_dir().join(name), dir.path().join(name)).unwrap();
        }
        dir
    }

    fn default_form() -> RawAssessment {
        RawAssessment {
            age: 30,
            gender: Gender::Male,
            employment_status: EmploymentStatus::Employed,
            work_environment: WorkEnvironment::OnSite,
            mental_health_history: "no".to_string(),
            seeks_treatment: "no".to_string(),
            stress_level: 5,
            sleep_hours: 7.0,
            physical_activity_days: 2,
            depression_items: [0, 0, 0],
            anxiety_items: [0, 0, 0],
            social_support_items: [3, 3],
            productivity_items: [3, 2],
        }
    }

    fn severe_form() -> RawAssessment {
        RawAssessment {
            age: 45,
            gender: Gender::Female,
            employment_status: EmploymentStatus::Unemployed,
            work_environment: WorkEnvironment::Remote,
            mental_health_history: "yes".to_string(),
            seeks_treatment: "yes".to_string(),
            stress_level: 10,
            sleep_hours: 3.0,
            physical_activity_days: 0,
            depression_items: [3, 3, 3],
            anxiety_items: [3, 3, 3],
            social_support_items: [0, 0],
            productivity_items: [0, 4],
        }
    }

    #[test]
    fn test_sample_artifacts_load() {
        let ctx = load_context(&ArtifactPaths::new(sample_dir()), ModelBackend::Linear).unwrap();

        assert_eq!(ctx.labels(), ["high", "low", "medium"]);
        assert_eq!(ctx.metadata().backend, "linear");
        assert_eq!(ctx.metadata().source, LINEAR_PIPELINE_FILE);
        assert_eq!(ctx.schema().feature_names().len(), 13);
    }

    #[test]
    fn test_default_form_is_low_risk() {
        let ctx = load_context(&ArtifactPaths::new(sample_dir()), ModelBackend::Linear).unwrap();
        let assessment = assess(&ctx, &default_form()).unwrap();

        assert_eq!(assessment.result.predicted_label, "low");
        assert_eq!(assessment.result.risk_level(), Some(RiskLevel::Low));
        let total: f64 = assessment.result.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_severe_form_is_high_risk() {
        let ctx = load_context(&ArtifactPaths::new(sample_dir()), ModelBackend::Linear).unwrap();
        let assessment = assess(&ctx, &severe_form()).unwrap();

        assert_eq!(assessment.result.predicted_label, "high");
        let ordered: Vec<_> = assessment
            .result
            .severity_ordered()
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(ordered, ["low", "medium", "high"]);
    }

    #[test]
    fn test_middling_form_is_medium_risk() {
        let ctx = load_context(&ArtifactPaths::new(sample_dir()), ModelBackend::Linear).unwrap();
        let raw = RawAssessment {
            age: 35,
            gender: Gender::Female,
            work_environment: WorkEnvironment::Hybrid,
            physical_activity_days: 3,
            depression_items: [2, 1, 1],
            anxiety_items: [1, 2, 1],
            social_support_items: [2, 3],
            productivity_items: [2, 2],
            ..default_form()
        };

        let assessment = assess(&ctx, &raw).unwrap();
        assert_eq!(assessment.result.predicted_label, "medium");
    }

    #[test]
    fn test_manifest_checksums() {
        let dir = scratch_copy();
        let paths = ArtifactPaths::new(dir.path());

        let digests: serde_json::Map<String, serde_json::Value> = SAMPLE_FILES
            .iter()
            .map(|name| {
                let bytes = fs::read(dir.path().join(name)).unwrap();
                (name.to_string(), serde_json::Value::from(sha256_hex(&bytes)))
            })
            .collect();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            serde_json::json!({ "sha256": digests }).to_string(),
        )
        .unwrap();

        assert!(load_context(&paths, ModelBackend::Linear).is_ok());

        // same shape, different bytes
        let tampered = fs::read_to_string(dir.path().join(LABEL_ENCODER_FILE))
            .unwrap()
            .replace("medium", "severe");
        fs::write(dir.path().join(LABEL_ENCODER_FILE), tampered).unwrap();

        match load_context(&paths, ModelBackend::Linear) {
            Err(AssessmentError::ArtifactUnavailable { artifact, reason }) => {
                assert_eq!(artifact, LABEL_ENCODER_FILE);
                assert!(reason.contains("checksum"));
            }
            other => panic!("expected checksum failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_missing_artifacts_abort_loading() {
        for missing in SAMPLE_FILES {
            let dir = scratch_copy();
            fs::remove_file(dir.path().join(missing)).unwrap();

            match load_context(&ArtifactPaths::new(dir.path()), ModelBackend::Auto) {
                Err(AssessmentError::ArtifactUnavailable { artifact, .. }) => {
                    assert_eq!(artifact, missing);
                }
                other => panic!("expected {} to be unavailable, got {:?}", missing, other.err()),
            }
        }
    }

    #[test]
    fn test_corrupt_onnx_export_aborts_loading() {
        let dir = scratch_copy();
        fs::write(dir.path().join(ONNX_PIPELINE_FILE), b"not a model").unwrap();
        let paths = ArtifactPaths::new(dir.path());

        match load_context(&paths, ModelBackend::Onnx) {
            Err(AssessmentError::ArtifactUnavailable { artifact, .. }) => {
                assert_eq!(artifact, ONNX_PIPELINE_FILE);
            }
            other => panic!("expected ArtifactUnavailable, got {:?}", other.err()),
        }

        // auto picks the export up and must not fall back to the linear model
        #[cfg(feature = "onnx")]
        assert!(matches!(
            load_context(&paths, ModelBackend::Auto),
            Err(AssessmentError::ArtifactUnavailable { .. })
        ));
    }

    #[test]
    fn test_label_count_mismatch_is_schema_mismatch() {
        let dir = scratch_copy();
        fs::write(
            dir.path().join(LABEL_ENCODER_FILE),
            r#"{"classes": ["high", "low"]}"#,
        )
        .unwrap();

        assert!(matches!(
            load_context(&ArtifactPaths::new(dir.path()), ModelBackend::Linear),
            Err(AssessmentError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_linear_inputs_must_match_feature_names() {
        let dir = scratch_copy();
        let model = fs::read_to_string(dir.path().join(LINEAR_PIPELINE_FILE))
            .unwrap()
            .replace("\"sleep_hours\"", "\"bmi\"");
        fs::write(dir.path().join(LINEAR_PIPELINE_FILE), model).unwrap();

        match load_context(&ArtifactPaths::new(dir.path()), ModelBackend::Linear) {
            Err(AssessmentError::SchemaMismatch(msg)) => {
                assert!(msg.contains("sleep_hours"));
                assert!(msg.contains("bmi"));
            }
            other => panic!("expected SchemaMismatch at load, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_linear_must_cover_trained_vocabulary() {
        let dir = scratch_copy();
        let model = fs::read_to_string(dir.path().join(LINEAR_PIPELINE_FILE))
            .unwrap()
            .replace("\"remote\"", "\"office\"");
        fs::write(dir.path().join(LINEAR_PIPELINE_FILE), model).unwrap();

        match load_context(&ArtifactPaths::new(dir.path()), ModelBackend::Linear) {
            Err(AssessmentError::SchemaMismatch(msg)) => assert!(msg.contains("remote")),
            other => panic!("expected SchemaMismatch at load, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_renamed_feature_is_schema_mismatch() {
        let dir = scratch_copy();
        let names = fs::read_to_string(dir.path().join(FEATURE_NAMES_FILE))
            .unwrap()
            .replace("\"sleep_hours\"", "\"hours_slept\"");
        fs::write(dir.path().join(FEATURE_NAMES_FILE), names).unwrap();

        match load_context(&ArtifactPaths::new(dir.path()), ModelBackend::Linear) {
            Err(AssessmentError::SchemaMismatch(msg)) => {
                assert!(msg.contains("sleep_hours"));
                assert!(msg.contains("hours_slept"));
            }
            other => panic!("expected SchemaMismatch, got {:?}", other.err()),
        }
    }
}
