use paging_scheduler_sim::domain::memory::memory_policy::MemoryPolicy;
use paging_scheduler_sim::domain::memory::pool::Utilization;
use paging_scheduler_sim::domain::process::Process;
use paging_scheduler_sim::domain::scheduler::SchedulerType;
use paging_scheduler_sim::domain::simulator::config::SimulationConfig;
use paging_scheduler_sim::domain::simulator::event::SimulationEvent;
use paging_scheduler_sim::run_simulation;
use paging_scheduler_sim::traits::RecordingSink;

fn running(clock: u64, pid: u32, remaining_time: u64) -> SimulationEvent {
    SimulationEvent::Running { clock, pid, remaining_time, load_time: 0, utilization: Utilization::Unlimited, held_frames: vec![] }
}

fn finished(clock: u64, pid: u32, arrived_remaining: usize) -> SimulationEvent {
    SimulationEvent::Finished { clock, pid, arrived_remaining }
}

/// Runs without memory management and returns every event except the summary.
fn simulate(scheduler: SchedulerType, quantum: u64, processes: Vec<Process>) -> (Vec<SimulationEvent>, SimulationEvent) {
    let config = SimulationConfig::new(scheduler, MemoryPolicy::Unlimited, 0).with_quantum(quantum);
    let mut sink = RecordingSink::new();
    run_simulation(config, processes, &mut sink).unwrap();

    let summary = sink.events.pop().unwrap();
    assert!(matches!(summary, SimulationEvent::Summary(_)));
    (sink.events, summary)
}

#[test]
fn test_fcfs_runs_in_arrival_order() {
    let (events, summary) = simulate(SchedulerType::Fcfs, 10, vec![Process::new(1, 2, 0, 5), Process::new(0, 1, 0, 10)]);

    assert_eq!(events, vec![running(0, 1, 10), finished(10, 1, 1), running(10, 2, 5), finished(15, 2, 0)]);

    let SimulationEvent::Summary(summary) = summary else { unreachable!() };
    assert_eq!(summary.makespan, 15);
    assert_eq!(summary.turnaround_avg, 12);
    assert_eq!((summary.throughput_avg, summary.throughput_min, summary.throughput_max), (2, 2, 2));
    assert!((summary.overhead_max - 2.8).abs() < 1e-9);
    assert!((summary.overhead_avg - 1.9).abs() < 1e-9);
}

#[test]
fn test_fcfs_idles_until_first_arrival() {
    let (events, _) = simulate(SchedulerType::Fcfs, 10, vec![Process::new(5, 7, 0, 3)]);
    assert_eq!(events, vec![running(5, 7, 3), finished(8, 7, 0)]);
}

#[test]
fn test_round_robin_slices_until_done() {
    let (events, _) = simulate(SchedulerType::RoundRobin, 4, vec![Process::new(0, 1, 0, 10)]);
    assert_eq!(events, vec![running(0, 1, 10), running(4, 1, 6), running(8, 1, 2), finished(10, 1, 0)]);
}

#[test]
fn test_round_robin_queues_arrivals_ahead_of_preempted_process() {
    let (events, _) = simulate(SchedulerType::RoundRobin, 4, vec![Process::new(0, 1, 0, 6), Process::new(2, 2, 0, 3)]);
    assert_eq!(events, vec![running(0, 1, 6), running(4, 2, 3), finished(7, 2, 1), running(7, 1, 2), finished(9, 1, 0)]);
}

#[test]
fn test_shortest_job_picks_shortest_arrived_process() {
    let processes = vec![Process::new(0, 1, 0, 10), Process::new(1, 2, 0, 8), Process::new(2, 3, 0, 2), Process::new(3, 4, 0, 2)];
    let (events, _) = simulate(SchedulerType::ShortestRemaining, 10, processes);

    // pid 1 is alone at t=0. Ties between 3 and 4 keep arrival order.
    assert_eq!(
        events,
        vec![
            running(0, 1, 10),
            finished(10, 1, 3),
            running(10, 3, 2),
            finished(12, 3, 2),
            running(12, 4, 2),
            finished(14, 4, 1),
            running(14, 2, 8),
            finished(22, 2, 0),
        ]
    );
}

#[test]
fn test_empty_input_gives_zero_summary() {
    let (events, summary) = simulate(SchedulerType::Fcfs, 10, Vec::new());
    assert!(events.is_empty());

    let SimulationEvent::Summary(summary) = summary else { unreachable!() };
    assert_eq!(summary.makespan, 0);
    assert_eq!(summary.throughput_avg, 0);
    assert_eq!(summary.turnaround_avg, 0);
}
