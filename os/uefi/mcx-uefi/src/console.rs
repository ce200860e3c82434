use core::fmt;
use core::fmt::Write as _;
use log::warn;
use mcx_monitor::Host;
use uefi::boot;

/// The UEFI text console: standard output for text, standard input for
/// "press any key".
pub struct UefiConsole;

impl fmt::Write for UefiConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        uefi::system::with_stdout(|stdout| stdout.write_str(s))
    }
}

impl Host for UefiConsole {
    fn pause(&mut self) {
        uefi::println!("Press any key to continue ...");
        uefi::system::with_stdin(|stdin| {
            // Drop keystrokes typed before the prompt.
            if let Err(e) = stdin.reset(false) {
                warn!("Failed to reset console input: {e:?}");
            }

            let Some(key_event) = stdin.wait_for_key_event() else {
                warn!("Console input has no key event; not waiting");
                return;
            };
            if let Err(e) = boot::wait_for_event(&mut [key_event]) {
                warn!("Failed waiting for a key press: {e:?}");
                return;
            }

            // Consume the key so it does not leak to the next application.
            if let Err(e) = stdin.read_key() {
                warn!("Failed to read the acknowledged key: {e:?}");
            }
        });
    }
}
