use ndarray::{Array1, Array2};
use paramstate::tensor::{DType, TensorError, TensorValue};
use paramstate::{Config, ModelConfig, ModelError, ModelRecord, ModelState};

fn initial_state() -> ModelState {
    ModelState::new(vec![
        TensorValue::from(Array2::<f32>::zeros((3, 2))),
        TensorValue::from(Array1::<f32>::zeros(2)),
        TensorValue::from(Array1::<i64>::from(vec![0, 0])),
    ])
}

fn hosted_record() -> ModelRecord {
    let config = ModelConfig::load_binary(
        br#"{ "model_name": "mnist", "version": "1.0.0", "registry_id": "3" }"#,
    )
    .unwrap();

    let mut record = config.init().unwrap();
    record
        .load_model_state(&initial_state().encode().unwrap())
        .unwrap();
    record
}

#[test]
fn training_steps_update_only_the_current_state() {
    let mut record = hosted_record();

    for step in 1..=3 {
        let value = step as f32;
        let weight = Array2::<f32>::from_elem((3, 2), value);
        let bias = Array1::<f32>::from_elem(2, -value);

        let params = [weight.view().into_dyn(), bias.view().into_dyn()];
        assert_eq!(record.update_model(&params).unwrap(), 2);
    }

    let current = record.current_state().unwrap();
    assert_eq!(current.len(), 3);
    assert_eq!(current[0].to_vec::<f32>().unwrap(), vec![3.0; 6]);
    assert_eq!(current[1].to_vec::<f32>().unwrap(), vec![-3.0; 2]);
    assert_eq!(current[2], initial_state()[2]);

    assert_eq!(record.start_state(), Some(&initial_state()));
}

#[test]
fn current_state_can_be_saved_and_reloaded() {
    let mut record = hosted_record();
    let weight = Array2::<f32>::from_shape_fn((3, 2), |(i, j)| (i * 2 + j) as f32);
    record.update_model(&[weight.clone()]).unwrap();

    let bytes = record.current_state().unwrap().encode().unwrap();
    let mut restored = ModelRecord::new("mnist").unwrap();
    restored.load_model_state(&bytes).unwrap();

    let restored_weight = restored.start_state().unwrap()[0]
        .to_ndarray::<f32>()
        .unwrap();
    assert_eq!(restored_weight, weight.into_dyn());
}

#[test]
fn unloaded_record_ignores_updates() {
    let mut record = ModelRecord::new("m").unwrap();
    let params = [Array1::<f32>::ones(2), Array1::<f32>::ones(3)];

    assert_eq!(record.update_model(&params).unwrap(), 0);
    assert!(record.current_state().is_none());
}

#[test]
fn corrupted_download_keeps_the_loaded_state() {
    let mut record = hosted_record();
    let mut bytes = initial_state().encode().unwrap();
    // Second byte is the first record's element type tag.
    bytes[1] = 0xee;

    let err = record.load_model_state(&bytes).unwrap_err();

    assert!(matches!(
        err,
        ModelError::Tensor(TensorError::MalformedEncoding(_))
    ));
    assert_eq!(record.current_state(), Some(&initial_state()));
    assert_eq!(record.start_state(), Some(&initial_state()));
}

#[test]
fn replacement_dtype_is_not_validated() {
    let mut record = hosted_record();
    let ints = Array1::<i64>::from(vec![5, 6, 7]);

    record.update_model(&[ints]).unwrap();

    assert_eq!(record.current_state().unwrap()[0].dtype(), DType::I64);
    assert_eq!(record.start_state().unwrap()[0].dtype(), DType::F32);
}
