// signals.rs

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

extern "C" fn swallow(_: libc::c_int) {}

/// Keeps Ctrl-C and Ctrl-\ from killing the shell.
///
/// A caught handler rather than SIG_IGN: caught signals go back to their
/// default action on exec, so programs the shell starts stay interruptible.
pub fn ignore_interrupts() -> nix::Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(swallow),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGQUIT] {
        unsafe { sigaction(signal, &action) }?;
    }
    Ok(())
}
