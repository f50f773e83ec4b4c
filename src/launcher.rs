// launcher.rs

use std::ffi::{CString, NulError};

use itertools::Itertools;
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{execvp, fork, write, ForkResult, Pid};
use thiserror::Error;

const EXEC_FAILED_STATUS: i32 = 127;
const EXEC_FAILED_MESSAGE: &[u8] = b"Command not recognized.\n";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no command to run")]
    EmptyCommand,
    #[error("argument contains a NUL byte: {0}")]
    InvalidArgument(#[from] NulError),
    #[error("fork failed: {0}")]
    Fork(#[source] Errno),
    #[error("waiting for child {pid} failed: {source}")]
    Wait {
        pid: i32,
        #[source]
        source: Errno,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildExit {
    Exited(i32),
    Signaled(i32),
}

/// Starts programs on the shell's behalf.
///
/// `wait` must only return once the process behind that handle has ended,
/// whatever else terminates in the meantime.
pub trait ProcessLauncher {
    type Handle;

    fn launch(&mut self, program: &str, args: &[String]) -> Result<Self::Handle, LaunchError>;

    fn wait(&mut self, handle: Self::Handle) -> Result<ChildExit, LaunchError>;
}

/// fork + execvp, resolving the program through `PATH`.
#[derive(Default)]
pub struct ForkLauncher;

impl ProcessLauncher for ForkLauncher {
    type Handle = Pid;

    fn launch(&mut self, program: &str, args: &[String]) -> Result<Pid, LaunchError> {
        if program.is_empty() {
            return Err(LaunchError::EmptyCommand);
        }
        // Build everything before forking so the child only execs or exits.
        let cmd = CString::new(program)?;
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(cmd.clone());
        for arg in args {
            argv.push(CString::new(arg.as_str())?);
        }
        log::debug!("launching {} {}", program, args.iter().join(" "));

        match unsafe { fork() } {
            Ok(ForkResult::Child) => {
                let _ = execvp(&cmd, &argv);
                let _ = write(libc::STDOUT_FILENO, EXEC_FAILED_MESSAGE);
                unsafe { libc::_exit(EXEC_FAILED_STATUS) }
            }
            Ok(ForkResult::Parent { child }) => Ok(child),
            Err(errno) => Err(LaunchError::Fork(errno)),
        }
    }

    fn wait(&mut self, pid: Pid) -> Result<ChildExit, LaunchError> {
        loop {
            match waitpid(pid, None) {
                Ok(WaitStatus::Exited(_, code)) => return Ok(ChildExit::Exited(code)),
                Ok(WaitStatus::Signaled(_, signal, _)) => {
                    return Ok(ChildExit::Signaled(signal as i32))
                }
                Ok(other) => log::debug!("child {} changed state: {:?}", pid, other),
                Err(Errno::EINTR) => continue,
                Err(source) => {
                    return Err(LaunchError::Wait {
                        pid: pid.as_raw(),
                        source,
                    })
                }
            }
        }
    }
}
