use std::collections::HashMap;
use std::io::{self, Write};

use toastline::stack::{NotificationId, ToastStack};
use toastline::toast::{Card, Snapshot};

/// Prints a line per toast whenever its visible state changes.
pub struct Renderer<W> {
    out: W,
    last: HashMap<NotificationId, Snapshot>,
}

impl Renderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: HashMap::new(),
        }
    }

    pub fn frame(&mut self, stack: &ToastStack) -> io::Result<()> {
        for toast in stack.visible() {
            if self.last.get(&toast.id) == Some(&toast.snapshot) {
                continue;
            }
            self.last.insert(toast.id, toast.snapshot);
            let card = Card::new(toast.descriptor, toast.snapshot.phase, toast.snapshot.press);
            writeln!(self.out, "{} {card}", toast.id)?;
        }
        self.out.flush()
    }

    pub fn removed(&mut self, id: NotificationId) -> io::Result<()> {
        self.last.remove(&id);
        writeln!(self.out, "{id} removed")?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
