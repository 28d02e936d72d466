use crate::domain::memory::MemoryLoad;
use crate::domain::memory::pool::{MIN_RESIDENT_PAGES, MemoryPool, min_pages};
use crate::domain::memory::virtual_memory::charge_page_faults;
use crate::domain::process::{Process, Time};
use crate::domain::ready_queue::ReadyQueue;
use crate::error::Result;

/// Fair-share allocation: memory is split in proportion to the CPU time each ready process still
/// needs.
///
/// When the share doesn't fit, the arrived queue is swept repeatedly, taking one page from every
/// process above the minimum working set. A sweep that frees nothing switches to forced mode,
/// where any holder gives up a page.
pub fn load_fair_share(clock: Time, pool: &mut MemoryPool, arrived: &mut ReadyQueue, process: &mut Process) -> Result<MemoryLoad> {
    if process.is_fully_loaded() {
        return Ok(MemoryLoad::default());
    }

    let min = min_pages(process);
    let target = fair_share_target(pool.total_pages(), process, arrived);
    let wanted = clamp_to_requirement(target, process, min);
    log::debug!("t={} fair share for pid {}: target {} pages, requesting {}", clock, process.pid, target, wanted);

    let evicted = if pool.empty_pages() >= wanted { Vec::new() } else { sweep_evict(clock, pool, arrived, wanted) };

    let granted = pool.allocate(process, wanted)?;
    charge_page_faults(process);

    Ok(MemoryLoad::new(granted, evicted))
}

/// Pages `process` deserves: its share of the remaining CPU time across itself and every arrived
/// process, applied to the whole pool. Rounded down.
pub fn fair_share_target(total_pages: usize, process: &Process, arrived: &ReadyQueue) -> usize {
    let total_time = process.remaining_time + arrived.total_remaining_time();
    if total_time == 0 {
        return process.mem_req;
    }
    (total_pages as u128 * process.remaining_time as u128 / total_time as u128) as usize
}

/// Converts a target page count into the number of pages to request now. Never more than the
/// process is missing, never less than its minimum.
pub fn clamp_to_requirement(target: usize, process: &Process, min: usize) -> usize {
    if target > process.mem_req {
        process.unloaded_pages()
    } else if target < min + process.pages_used() {
        min
    } else {
        target - process.pages_used()
    }
}

fn sweep_evict(clock: Time, pool: &mut MemoryPool, arrived: &mut ReadyQueue, wanted: usize) -> Vec<usize> {
    let mut evicted = Vec::new();
    let mut forced = false;

    while pool.empty_pages() < wanted {
        let mut freed_this_sweep = 0;

        for key in arrived.keys() {
            if pool.empty_pages() >= wanted {
                break;
            }
            let Some(victim) = arrived.get_mut(key) else { continue };
            let held = victim.pages_used();
            if held > MIN_RESIDENT_PAGES || (forced && held > 0) {
                evicted.extend(pool.evict(victim, 1));
                freed_this_sweep += 1;
            }
        }

        if pool.empty_pages() >= wanted {
            break;
        }
        if freed_this_sweep == 0 {
            if forced {
                log::error!(
                    "t={} fair share eviction found no holder left in the ready queue ({} pages wanted, {} free).",
                    clock,
                    wanted,
                    pool.empty_pages()
                );
                break;
            }
            log::debug!("t={} no process above the minimum working set, forcing eviction", clock);
            forced = true;
        }
    }

    evicted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_is_proportional_to_remaining_time() {
        let long = Process::with_pages(0, 1, 8, 30);
        let short = Process::with_pages(0, 2, 8, 10);

        let others: ReadyQueue = vec![short.clone()].into_iter().collect();
        assert_eq!(fair_share_target(8, &long, &others), 6);

        let others: ReadyQueue = vec![long].into_iter().collect();
        assert_eq!(fair_share_target(8, &short, &others), 2);
    }

    #[test]
    fn test_clamp_respects_minimum_and_requirement() {
        let mut process = Process::with_pages(0, 1, 6, 10);
        assert_eq!(clamp_to_requirement(9, &process, 4), 6);
        assert_eq!(clamp_to_requirement(2, &process, 4), 4);
        assert_eq!(clamp_to_requirement(5, &process, 4), 5);

        process.hold_frames(&[0, 1]);
        assert_eq!(clamp_to_requirement(5, &process, 2), 3);
        assert_eq!(clamp_to_requirement(3, &process, 2), 2);
    }

    #[test]
    fn test_sweep_takes_one_page_from_each_large_holder() {
        let mut pool = MemoryPool::new(12);
        let mut arrived = ReadyQueue::new();

        let mut a = Process::with_pages(0, 2, 6, 10);
        pool.allocate(&mut a, 6).unwrap(); // 0..6
        let mut b = Process::with_pages(0, 3, 6, 10);
        pool.allocate(&mut b, 6).unwrap(); // 6..12
        arrived.push_back(a);
        arrived.push_back(b);

        // Share is 12 * 10 / 30 = 4 pages.
        let mut process = Process::with_pages(0, 1, 8, 10);
        let load = load_fair_share(0, &mut pool, &mut arrived, &mut process).unwrap();

        assert_eq!(load.evicted, vec![0, 1, 6, 7]);
        assert_eq!(process.pages_used(), 4);
        assert_eq!(load.load_time, 8);
        assert_eq!(process.remaining_time, 14);

        let held: Vec<usize> = arrived.iter().map(|p| p.pages_used()).collect();
        assert_eq!(held, vec![4, 4]);
        assert!(pool.verify());
    }

    #[test]
    fn test_forced_sweep_takes_pages_below_minimum() {
        let mut pool = MemoryPool::new(8);
        let mut arrived = ReadyQueue::new();

        let mut a = Process::with_pages(0, 2, 4, 10);
        pool.allocate(&mut a, 4).unwrap(); // 0..4
        let mut b = Process::with_pages(0, 3, 4, 10);
        pool.allocate(&mut b, 4).unwrap(); // 4..8
        arrived.push_back(a);
        arrived.push_back(b);

        // Nobody is above the minimum, so the first sweep frees nothing and the second is forced.
        let mut process = Process::with_pages(0, 1, 4, 10);
        let load = load_fair_share(0, &mut pool, &mut arrived, &mut process).unwrap();

        assert_eq!(load.evicted, vec![0, 1, 4, 5]);
        assert!(process.is_fully_loaded());
        assert!(pool.verify());
    }

    #[test]
    fn test_empty_queue_with_too_small_pool_is_fatal() {
        let mut pool = MemoryPool::new(2);
        let mut arrived = ReadyQueue::new();
        let mut process = Process::with_pages(0, 1, 8, 10);

        assert!(load_fair_share(0, &mut pool, &mut arrived, &mut process).is_err());
    }
}
