use qsim::{
    simulate_nowait, simulate_queue, Error, SampleConfig, ServiceModel, SimulationConfig, Timeline,
};

#[test]
fn nowait_timeline_is_well_formed() {
    let timeline = simulate_nowait(100).unwrap();
    assert_eq!(timeline.len(), 200);
    assert_eq!(timeline.final_queue_size(), 0);
    assert!(timeline.iter().all(|entry| entry.queue_size >= 0));
    assert!(timeline
        .entries()
        .windows(2)
        .all(|pair| pair[0].time <= pair[1].time));
}

#[test]
fn queue_timeline_is_well_formed() {
    let timeline = simulate_queue(100).unwrap();
    assert_eq!(timeline.len(), 200);
    assert_eq!(timeline.final_queue_size(), 0);
    assert!(timeline.iter().all(|entry| entry.queue_size >= 0));
    assert!(timeline
        .entries()
        .windows(2)
        .all(|pair| pair[0].time <= pair[1].time));
}

#[test]
fn zero_jobs_is_rejected() {
    assert_eq!(simulate_nowait(0), Err(Error::NoJobs));
    assert_eq!(simulate_queue(0), Err(Error::NoJobs));
}

#[test]
fn seeded_runs_are_reproducible() {
    let config = SimulationConfig {
        num_jobs: 200,
        model: ServiceModel::SingleServer,
        samples: SampleConfig::default(),
        seed: Some(42),
    };
    assert_eq!(config.run().unwrap(), config.run().unwrap());
    let jobs = config.run_jobs().unwrap();
    assert_eq!(Timeline::from_jobs(&jobs), config.run().unwrap());
}

#[test]
fn single_server_never_overtakes() {
    let config = SimulationConfig {
        num_jobs: 500,
        model: ServiceModel::SingleServer,
        samples: SampleConfig::default(),
        seed: Some(7),
    };
    let jobs = config.run_jobs().unwrap();
    // FIFO order: with positive service durations the departures ascend.
    for pair in jobs.windows(2) {
        assert!(pair[0].departure_time < pair[1].departure_time);
        assert!(pair[1].departure_time >= pair[1].arrival_time + pair[1].service_duration);
    }
}

#[test]
fn overloaded_regime_builds_a_longer_queue() {
    // Service durations five times the mean inter-arrival duration.
    let overloaded = SimulationConfig {
        num_jobs: 300,
        model: ServiceModel::SingleServer,
        samples: SampleConfig {
            service_scale: 17.5,
            ..SampleConfig::default()
        },
        seed: Some(3),
    };
    let balanced = SimulationConfig {
        samples: SampleConfig::default(),
        ..overloaded
    };
    assert!(overloaded.run().unwrap().max_queue_size() > balanced.run().unwrap().max_queue_size());
}
