/*!
 * Property Tests
 * Termination, work conservation and metric sanity over random workloads
 */

use dynq_rr::{ProcessSpec, QuantumMode, Sim, compute_metrics, compute_quantum};
use proptest::prelude::*;
use std::collections::HashMap;

fn workload() -> impl Strategy<Value = Vec<ProcessSpec>> {
    prop::collection::vec((0i64..30, 1i64..20), 1..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (arrival, burst))| ProcessSpec::new(i as u64 + 1, arrival, burst))
            .collect()
    })
}

fn mode() -> impl Strategy<Value = QuantumMode> {
    prop::sample::select(QuantumMode::ALL.to_vec())
}

fn work_per_process(sim: &Sim<QuantumMode>) -> HashMap<u64, u64> {
    let mut work = HashMap::new();
    for s in sim.schedule() {
        *work.entry(s.process_id).or_insert(0) += s.duration;
    }
    work
}

proptest! {
    #[test]
    fn slices_sum_to_burst(specs in workload(), mode in mode()) {
        let mut sim = Sim::new(&specs, mode).unwrap();
        sim.run().unwrap();

        let work = work_per_process(&sim);
        for spec in &specs {
            prop_assert_eq!(work[&spec.id], spec.burst_time as u64);
        }
    }

    #[test]
    fn slices_never_overlap(specs in workload(), mode in mode()) {
        let mut sim = Sim::new(&specs, mode).unwrap();
        let schedule = sim.run().unwrap();

        for s in schedule {
            prop_assert!(s.duration >= 1);
            prop_assert_eq!(s.end_tick, s.start_tick + s.duration);
        }
        for w in schedule.windows(2) {
            prop_assert!(w[1].start_tick >= w[0].end_tick);
        }
    }

    #[test]
    fn metrics_are_consistent(specs in workload(), mode in mode()) {
        let mut sim = Sim::new(&specs, mode).unwrap();
        sim.run().unwrap();

        let first = compute_metrics(sim.table()).unwrap();
        let second = compute_metrics(sim.table()).unwrap();
        prop_assert_eq!(&first, &second);

        for m in first.values() {
            prop_assert!(m.turnaround_time >= m.burst_time);
            prop_assert_eq!(m.waiting_time, m.turnaround_time - m.burst_time);
            prop_assert!(m.completion_time >= m.arrival_time + m.burst_time);
        }
    }

    #[test]
    fn total_work_is_strategy_invariant(specs in workload()) {
        let runs: Vec<HashMap<u64, u64>> = QuantumMode::ALL
            .iter()
            .map(|&mode| {
                let mut sim = Sim::new(&specs, mode).unwrap();
                sim.run().unwrap();
                work_per_process(&sim)
            })
            .collect();

        prop_assert_eq!(&runs[0], &runs[1]);
        prop_assert_eq!(&runs[1], &runs[2]);
    }

    #[test]
    fn quantum_lies_between_min_and_max(
        remaining in prop::collection::vec(1u64..10_000, 1..16),
        mode in mode(),
    ) {
        let q = compute_quantum(&remaining, mode).unwrap();
        let min = *remaining.iter().min().unwrap();
        let max = *remaining.iter().max().unwrap();
        prop_assert!(q >= 1);
        prop_assert!(min <= q && q <= max);
    }
}
