use std::fmt;

/// Header line the firmware sends once at boot. The sink writes its own
/// header, so this line is recognized and dropped.
pub const HEADER_LINE: &str = "aX,aY,aZ,gX,gY,gZ";

/// Column names, in wire order.
pub const FIELD_NAMES: [&str; 6] = ["aX", "aY", "aZ", "gX", "gY", "gZ"];

pub const FIELDS_PER_SAMPLE: usize = 6;

/// One instant of accelerometer + gyroscope reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
}

impl Sample {
    /// Field values in wire order, for the record sink.
    pub fn fields(&self) -> [f64; FIELDS_PER_SAMPLE] {
        [self.ax, self.ay, self.az, self.gx, self.gy, self.gz]
    }
}

/// Why a non-empty, non-header line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    /// Wrong number of comma-separated fields.
    FieldCount(usize),
    /// Right field count, but the field at this index is not a number.
    BadNumber { index: usize },
}

/// A rejected line, kept verbatim for the operator warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: String,
    pub kind: MalformedKind,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MalformedKind::FieldCount(n) => write!(
                f,
                "unexpected line format (expected {} values, got {}): {}",
                FIELDS_PER_SAMPLE, n, self.line
            ),
            MalformedKind::BadNumber { index } => write!(
                f,
                "non-numeric {} field: {}",
                FIELD_NAMES[index], self.line
            ),
        }
    }
}

/// Classification of one raw serial line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// Empty or whitespace-only line, or nothing arrived before the read
    /// timeout. Not an error.
    Empty,
    /// The firmware's boot header. Dropped, the sink has its own.
    Header,
    /// A valid 6-field sample.
    Sample(Sample),
    /// Structurally invalid line, warned about and dropped.
    Malformed(MalformedLine),
}

/// Classify one line of serial text. Trailing whitespace/newline is
/// stripped here; the caller hands over the raw line.
///
/// No side effects, all logging and writing is done by callers.
pub fn classify_line(raw: &str) -> LineClass {
    let line = raw.trim();

    if line.is_empty() {
        return LineClass::Empty;
    }
    if line == HEADER_LINE {
        return LineClass::Header;
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELDS_PER_SAMPLE {
        return LineClass::Malformed(MalformedLine {
            line: line.to_string(),
            kind: MalformedKind::FieldCount(fields.len()),
        });
    }

    let mut values = [0.0f64; FIELDS_PER_SAMPLE];
    for (index, field) in fields.iter().enumerate() {
        match field.trim().parse::<f64>() {
            Ok(v) => values[index] = v,
            Err(_) => {
                return LineClass::Malformed(MalformedLine {
                    line: line.to_string(),
                    kind: MalformedKind::BadNumber { index },
                });
            }
        }
    }

    LineClass::Sample(Sample {
        ax: values[0],
        ay: values[1],
        az: values[2],
        gx: values[3],
        gy: values[4],
        gz: values[5],
    })
}
