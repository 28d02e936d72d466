use crate::domain::memory::MemoryLoad;
use crate::domain::memory::pool::{MemoryPool, min_pages};
use crate::domain::process::{Process, Time};
use crate::domain::ready_queue::ReadyQueue;
use crate::error::Result;

/// Virtual memory allocation: a process may run once it holds its minimum working set.
///
/// With enough free frames it gets as many of its missing pages as fit. Otherwise single pages
/// are taken from the least recently admitted holders until the minimum fits, and exactly the
/// minimum is granted. Pages still missing afterwards are charged as page faults, one time unit each.
///
/// The charge is added on every dispatch, so under round robin a process that stays short of
/// more pages than the quantum gains more remaining time than it runs and never finishes.
pub fn load_partially(clock: Time, pool: &mut MemoryPool, arrived: &mut ReadyQueue, process: &mut Process) -> Result<MemoryLoad> {
    if process.is_fully_loaded() {
        return Ok(MemoryLoad::default());
    }

    let min = min_pages(process);

    if pool.empty_pages() >= min {
        let granted = allocate_available(pool, process)?;
        return Ok(MemoryLoad::new(granted, Vec::new()));
    }

    let mut evicted = Vec::new();
    let mut candidate = arrived.least_recently_admitted_with_pages();

    while pool.empty_pages() < min {
        let Some(key) = candidate else {
            log::error!(
                "t={} virtual allocation for pid {} ran past the end of the ready queue ({} pages needed, {} free).",
                clock,
                process.pid,
                min,
                pool.empty_pages()
            );
            break;
        };

        if let Some(victim) = arrived.get_mut(key) {
            while victim.pages_used() > 0 && pool.empty_pages() < min {
                evicted.extend(pool.evict(victim, 1));
            }
        }
        candidate = arrived.next_holder_after(key);
    }

    log::debug!("t={} evicted {} pages so pid {} reaches its minimum of {}", clock, evicted.len(), process.pid, min);

    let granted = pool.allocate(process, min)?;
    charge_page_faults(process);

    Ok(MemoryLoad::new(granted, evicted))
}

/// Grants as many missing pages as are free and charges the rest as page faults.
pub fn allocate_available(pool: &mut MemoryPool, process: &mut Process) -> Result<usize> {
    let wanted = process.unloaded_pages().min(pool.empty_pages());
    let granted = pool.allocate(process, wanted)?;
    charge_page_faults(process);
    Ok(granted)
}

pub(crate) fn charge_page_faults(process: &mut Process) {
    process.remaining_time += process.unloaded_pages() as Time;
}
