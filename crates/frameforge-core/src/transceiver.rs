//! The transceiver capability: an opaque byte sink/source the processor
//! owns exclusively for its lifetime.
//!
//! Synchronous and non-blocking by contract, mirroring the three concrete
//! drivers in `frameforge-transport` (serial port, single UDP socket,
//! paired UDP loopback). Kept free of `async` here since the processor's
//! own scheduling model is a plain caller-driven `update` loop, not a
//! runtime task.
pub trait Transceiver {
    /// Open whatever resource backs this transceiver. Returns `false` on
    /// failure; the processor treats that as fatal and refuses to start.
    fn init(&mut self) -> bool;

    /// Best-effort send. Failures are the transceiver's own concern to log;
    /// they are not surfaced to the processor.
    fn send(&mut self, bytes: &[u8]);

    /// Non-blocking receive: copy as many bytes as are currently available
    /// into `buf`, up to its length, and return the count. Zero means no
    /// data is currently available, not end-of-stream.
    fn recv(&mut self, buf: &mut [u8]) -> usize;

    /// Release the underlying resource. Idempotent: called once by the
    /// processor when it is dropped, but safe to call more than once.
    fn deinit(&mut self);
}

impl Transceiver for Box<dyn Transceiver> {
    fn init(&mut self) -> bool {
        (**self).init()
    }

    fn send(&mut self, bytes: &[u8]) {
        (**self).send(bytes);
    }

    fn recv(&mut self, buf: &mut [u8]) -> usize {
        (**self).recv(buf)
    }

    fn deinit(&mut self) {
        (**self).deinit();
    }
}
