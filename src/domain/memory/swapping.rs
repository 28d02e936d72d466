use crate::domain::memory::MemoryLoad;
use crate::domain::memory::pool::MemoryPool;
use crate::domain::process::{Process, Time};
use crate::domain::ready_queue::ReadyQueue;
use crate::error::Result;

/// Loads `process` completely, swapping out whole processes (least recently admitted first)
/// until its missing pages fit.
pub fn swap_in(clock: Time, pool: &mut MemoryPool, arrived: &mut ReadyQueue, process: &mut Process) -> Result<MemoryLoad> {
    if process.is_fully_loaded() {
        return Ok(MemoryLoad::default());
    }

    let mut evicted = Vec::new();
    let mut candidate = arrived.least_recently_admitted_with_pages();

    while process.unloaded_pages() > pool.empty_pages() {
        let Some(key) = candidate else {
            log::error!(
                "t={} swapping for pid {} ran past the end of the ready queue ({} pages needed, {} free).",
                clock,
                process.pid,
                process.unloaded_pages(),
                pool.empty_pages()
            );
            break;
        };

        if let Some(victim) = arrived.get_mut(key) {
            let held = victim.pages_used();
            log::debug!("t={} swapping out pid {} ({} pages) for pid {}", clock, victim.pid, held, process.pid);
            evicted.extend(pool.evict(victim, held));
        }
        candidate = arrived.next_holder_after(key);
    }

    let missing = process.unloaded_pages();
    let granted = pool.allocate(process, missing)?;

    Ok(MemoryLoad::new(granted, evicted))
}
