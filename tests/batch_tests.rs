use chart_scale::api::{AxisRequest, divide_scales_parallel};
use chart_scale::core::{AnyScaleEngine, LogScaleEngine, ScaleEngine, TickType};

#[test]
fn parallel_results_match_sequential_division() {
    let engine = AnyScaleEngine::default();
    let requests: Vec<AxisRequest> = (0..64)
        .map(|i| {
            let offset = f64::from(i) * 13.7;
            AxisRequest::new(-offset, offset + 50.0, 8, 4)
        })
        .collect();

    let parallel = divide_scales_parallel(&engine, &requests);
    assert_eq!(parallel.len(), requests.len());

    for (request, division) in requests.iter().zip(&parallel) {
        let expected = engine.divide_scale(
            request.x1,
            request.x2,
            request.max_major_steps,
            request.max_minor_steps,
            request.step_size,
        );
        assert_eq!(division, &expected);
    }
}

#[test]
fn explicit_step_and_inverted_requests() {
    let engine = AnyScaleEngine::default();
    let requests = [
        AxisRequest::new(0.0, 10.0, 5, 0).with_step_size(2.5),
        AxisRequest::new(100.0, 0.0, 10, 0),
    ];

    let divisions = divide_scales_parallel(&engine, &requests);
    assert_eq!(
        divisions[0].ticks(TickType::Major),
        &[0.0, 2.5, 5.0, 7.5, 10.0]
    );
    assert!(divisions[1].lower_bound() > divisions[1].upper_bound());
}

#[test]
fn log_engine_is_shared_across_workers() {
    let engine = LogScaleEngine::default();
    let requests = vec![AxisRequest::new(1.0, 1000.0, 10, 5); 16];

    let divisions = divide_scales_parallel(&engine, &requests);
    assert!(divisions.iter().all(|d| d.ticks(TickType::Major).len() == 4));
}

#[test]
fn empty_batch_is_empty() {
    let engine = AnyScaleEngine::default();
    assert!(divide_scales_parallel(&engine, &[]).is_empty());
}
