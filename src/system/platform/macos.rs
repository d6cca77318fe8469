//! Mach host queries. The per-core load-info array returned by
//! `host_processor_info` is kernel-allocated and must be handed back with
//! `vm_deallocate`; [`CpuLoadInfoBuffer`] owns it so release happens exactly
//! once on every exit path.

use super::{CPU_STATE_COUNT, CoreTicks, HostQueries, MemoryCounts};
use crate::error::ProbeError;

#[allow(non_camel_case_types)]
type kern_return_t = libc::c_int;
#[allow(non_camel_case_types)]
type integer_t = libc::c_int;
#[allow(non_camel_case_types)]
type natural_t = libc::c_uint;
#[allow(non_camel_case_types)]
type mach_msg_type_number_t = natural_t;

const KERN_SUCCESS: kern_return_t = 0;
const PROCESSOR_CPU_LOAD_INFO: libc::c_int = 2;
const HOST_VM_INFO64: libc::c_int = 4;
// sizeof(vm_statistics64_data_t) / sizeof(integer_t)
const HOST_VM_INFO64_COUNT: mach_msg_type_number_t = 38;

// vm_statistics64 word offsets for the page counts we read.
const VM_ACTIVE_COUNT: usize = 1;
const VM_WIRE_COUNT: usize = 3;

unsafe extern "C" {
    static mach_task_self_: libc::mach_port_t;

    fn mach_host_self() -> libc::mach_port_t;

    fn host_processor_info(
        host: libc::mach_port_t,
        flavor: libc::c_int,
        out_processor_count: *mut natural_t,
        out_processor_info: *mut *mut integer_t,
        out_processor_info_count: *mut mach_msg_type_number_t,
    ) -> kern_return_t;

    fn host_statistics64(
        host: libc::mach_port_t,
        flavor: libc::c_int,
        host_info_out: *mut integer_t,
        host_info_out_count: *mut mach_msg_type_number_t,
    ) -> kern_return_t;

    fn vm_deallocate(
        target_task: libc::mach_port_t,
        address: usize,
        size: usize,
    ) -> kern_return_t;
}

/// Owned view of the kernel-allocated per-core load-info array.
struct CpuLoadInfoBuffer {
    info: *mut integer_t,
    info_count: mach_msg_type_number_t,
    processor_count: natural_t,
}

impl CpuLoadInfoBuffer {
    fn acquire() -> Result<Self, ProbeError> {
        let mut processor_count: natural_t = 0;
        let mut info: *mut integer_t = std::ptr::null_mut();
        let mut info_count: mach_msg_type_number_t = 0;

        let status = unsafe {
            host_processor_info(
                mach_host_self(),
                PROCESSOR_CPU_LOAD_INFO,
                &mut processor_count,
                &mut info,
                &mut info_count,
            )
        };
        if status != KERN_SUCCESS {
            return Err(ProbeError::HostCall {
                call: "host_processor_info",
                status,
            });
        }
        Ok(CpuLoadInfoBuffer {
            info,
            info_count,
            processor_count,
        })
    }

    fn core_ticks(&self) -> Vec<CoreTicks> {
        let words =
            unsafe { std::slice::from_raw_parts(self.info, self.info_count as usize) };
        words
            .chunks_exact(CPU_STATE_COUNT)
            .take(self.processor_count as usize)
            .map(|chunk| {
                // PROCESSOR_CPU_LOAD_INFO order: user, system, idle, nice.
                [
                    chunk[0] as u32 as u64,
                    chunk[1] as u32 as u64,
                    chunk[2] as u32 as u64,
                    chunk[3] as u32 as u64,
                ]
            })
            .collect()
    }
}

impl Drop for CpuLoadInfoBuffer {
    fn drop(&mut self) {
        let size = self.info_count as usize * std::mem::size_of::<integer_t>();
        unsafe {
            vm_deallocate(mach_task_self_, self.info as usize, size);
        }
    }
}

pub struct Platform;

impl HostQueries for Platform {
    fn per_core_ticks() -> Result<Vec<CoreTicks>, ProbeError> {
        let buffer = CpuLoadInfoBuffer::acquire()?;
        Ok(buffer.core_ticks())
    }

    fn memory_counts() -> Result<MemoryCounts, ProbeError> {
        let mut words = [0 as integer_t; HOST_VM_INFO64_COUNT as usize];
        let mut count = HOST_VM_INFO64_COUNT;
        let status = unsafe {
            host_statistics64(mach_host_self(), HOST_VM_INFO64, words.as_mut_ptr(), &mut count)
        };
        if status != KERN_SUCCESS {
            return Err(ProbeError::HostCall {
                call: "host_statistics64",
                status,
            });
        }

        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        let page_size = if page_size > 0 { page_size as u64 } else { 4096 };
        Ok(MemoryCounts {
            active_bytes: words[VM_ACTIVE_COUNT] as u32 as u64 * page_size,
            wired_bytes: words[VM_WIRE_COUNT] as u32 as u64 * page_size,
        })
    }

    fn total_memory_bytes() -> Result<u64, ProbeError> {
        let mut memsize: u64 = 0;
        let mut len = std::mem::size_of::<u64>();
        let name = c"hw.memsize";
        let status = unsafe {
            libc::sysctlbyname(
                name.as_ptr(),
                (&raw mut memsize).cast(),
                &mut len,
                std::ptr::null_mut(),
                0,
            )
        };
        if status != 0 {
            return Err(ProbeError::HostCall {
                call: "sysctlbyname(hw.memsize)",
                status,
            });
        }
        Ok(memsize)
    }
}
