use crate::Error;

fn check_lengths(arrivals: &[f64], services: &[f64]) -> Result<(), Error> {
    if arrivals.len() == services.len() {
        Ok(())
    } else {
        Err(Error::MismatchedLengths(arrivals.len(), services.len()))
    }
}

/// Computes departure times for the no-wait regime.
///
/// Service capacity is treated as unlimited, so every job is served
/// immediately on arrival: `departure[i] = arrival[i] + service[i]`,
/// independently per job. An empty input yields an empty output.
///
/// # Errors
///
/// Returns [`Error::MismatchedLengths`] when the two sequences differ in
/// length.
pub fn nowait_departures(arrivals: &[f64], services: &[f64]) -> Result<Vec<f64>, Error> {
    check_lengths(arrivals, services)?;
    Ok(arrivals
        .iter()
        .zip(services)
        .map(|(&arrival, &service)| arrival + service)
        .collect())
}

/// Computes departure times for a FIFO single-server queue.
///
/// The server processes at most one job at a time, strictly in arrival
/// order. Job `i` begins service at the later of its own arrival and the
/// previous job's departure, and departs after its service duration elapses:
///
/// ```text
/// departure[0] = arrival[0] + service[0]
/// departure[i] = max(arrival[i], departure[i - 1]) + service[i]
/// ```
///
/// The scan is strictly sequential; each step carries the previous departure
/// time forward. An empty input yields an empty output.
///
/// # Errors
///
/// Returns [`Error::MismatchedLengths`] when the two sequences differ in
/// length, and [`Error::UnsortedArrivals`] when the arrival times are not
/// ascending.
pub fn queue_departures(arrivals: &[f64], services: &[f64]) -> Result<Vec<f64>, Error> {
    check_lengths(arrivals, services)?;
    if let Some(index) = arrivals.windows(2).position(|pair| pair[0] > pair[1]) {
        return Err(Error::UnsortedArrivals(index + 1));
    }
    let mut departures = Vec::with_capacity(arrivals.len());
    // The server is idle before the first arrival.
    let mut previous_departure = f64::NEG_INFINITY;
    for (&arrival, &service) in arrivals.iter().zip(services) {
        let begin = if previous_departure > arrival {
            previous_departure
        } else {
            arrival
        };
        previous_departure = begin + service;
        departures.push(previous_departure);
    }
    Ok(departures)
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck_macros::quickcheck;

    // Maps raw quickcheck input to an ascending arrival sequence and
    // non-negative service durations of the same length.
    fn streams_from(raw: &[(u16, u16)]) -> (Vec<f64>, Vec<f64>) {
        let mut time = 0.0;
        let arrivals = raw
            .iter()
            .map(|&(gap, _)| {
                time += f64::from(gap) / 16.0 + 0.01;
                time
            })
            .collect();
        let services = raw.iter().map(|&(_, work)| f64::from(work) / 16.0).collect();
        (arrivals, services)
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(nowait_departures(&[], &[]), Ok(vec![]));
        assert_eq!(queue_departures(&[], &[]), Ok(vec![]));
    }

    #[test]
    fn test_single_job() {
        assert_eq!(queue_departures(&[0.0], &[2.0]), Ok(vec![2.0]));
    }

    #[test]
    fn test_busy_server_delays_second_job() {
        // Job 1 arrives at 1.0 while the server is busy until 3.0.
        assert_eq!(
            queue_departures(&[0.0, 1.0], &[3.0, 1.0]),
            Ok(vec![3.0, 4.0])
        );
    }

    #[test]
    fn test_idle_server_serves_immediately() {
        assert_eq!(
            queue_departures(&[0.0, 5.0], &[1.0, 1.0]),
            Ok(vec![1.0, 6.0])
        );
    }

    #[test]
    fn test_nowait_is_the_sum_of_arrival_and_service() {
        assert_eq!(
            nowait_departures(&[0.0, 1.0, 2.5], &[3.0, 1.0, 0.5]),
            Ok(vec![3.0, 2.0, 3.0])
        );
    }

    #[test]
    fn test_zero_duration_services_are_not_an_error() {
        assert_eq!(
            queue_departures(&[0.0, 0.5, 0.5], &[0.0, 0.0, 1.0]),
            Ok(vec![0.0, 0.5, 1.5])
        );
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        assert_eq!(
            nowait_departures(&[0.0, 1.0], &[1.0]),
            Err(Error::MismatchedLengths(2, 1))
        );
        assert_eq!(
            queue_departures(&[0.0, 1.0], &[1.0]),
            Err(Error::MismatchedLengths(2, 1))
        );
    }

    #[test]
    fn test_descending_arrivals_are_rejected() {
        assert_eq!(
            queue_departures(&[0.0, 2.0, 1.0], &[1.0, 1.0, 1.0]),
            Err(Error::UnsortedArrivals(2))
        );
    }

    #[quickcheck]
    fn output_length_matches_input(raw: Vec<(u16, u16)>) -> bool {
        let (arrivals, services) = streams_from(&raw);
        nowait_departures(&arrivals, &services).unwrap().len() == raw.len()
            && queue_departures(&arrivals, &services).unwrap().len() == raw.len()
    }

    #[quickcheck]
    fn departure_never_precedes_arrival_plus_service(raw: Vec<(u16, u16)>) -> bool {
        let (arrivals, services) = streams_from(&raw);
        let departures = queue_departures(&arrivals, &services).unwrap();
        departures
            .iter()
            .zip(arrivals.iter().zip(&services))
            .all(|(&departure, (&arrival, &service))| departure >= arrival + service)
    }

    #[quickcheck]
    fn waiting_job_departs_after_previous_plus_service(raw: Vec<(u16, u16)>) -> bool {
        let (arrivals, services) = streams_from(&raw);
        let departures = queue_departures(&arrivals, &services).unwrap();
        (1..departures.len()).all(|i| {
            arrivals[i] >= departures[i - 1] || departures[i] >= departures[i - 1] + services[i]
        })
    }

    #[quickcheck]
    fn identical_input_yields_identical_output(raw: Vec<(u16, u16)>) -> bool {
        let (arrivals, services) = streams_from(&raw);
        queue_departures(&arrivals, &services) == queue_departures(&arrivals, &services)
            && nowait_departures(&arrivals, &services) == nowait_departures(&arrivals, &services)
    }
}
