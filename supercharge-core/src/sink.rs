//! Sample sinks.

/// Destination for mono 8-bit samples produced by the encoder.
///
/// Writing samples cannot fail: sinks buffer in memory and any I/O happens
/// once the whole tape has been encoded.
pub trait SampleSink {
    fn write_samples(&mut self, samples: &[u8]);
}

impl SampleSink for Vec<u8> {
    fn write_samples(&mut self, samples: &[u8]) {
        self.extend_from_slice(samples);
    }
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn write_samples(&mut self, samples: &[u8]) {
        (**self).write_samples(samples)
    }
}

/// Sink that only counts what it is given.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingSink {
    pub samples: usize,
}

impl SampleSink for CountingSink {
    fn write_samples(&mut self, samples: &[u8]) {
        self.samples += samples.len();
    }
}
