use std::fmt::Display;
use std::io::Write;

use serde::Serialize;

use crate::errors::ExtentError;
use crate::interval::{Endpoint, Interval};
use crate::query::{QueryOutput, SourcePairs};
use super::OutputFormat;

fn write_row<T, W>(writer: &mut W, ivals: &[Interval<T>]) -> Result<(), ExtentError>
where
    T: Endpoint + Display,
    W: Write + ?Sized,
{
    for (i, ival) in ivals.iter().enumerate() {
        if i > 0 {
            write!(writer, "\t")?;
        }
        write!(writer, "{}\t{}", ival.start(), ival.end())?;
    }

    writeln!(writer)?;
    Ok(())
}

fn write_spaced<T, W>(writer: &mut W, ivals: &[Interval<T>]) -> Result<(), ExtentError>
where
    T: Endpoint + Display,
    W: Write + ?Sized,
{
    let formatted: Vec<String> = ivals.iter().map(|ival| ival.to_string()).collect();
    writeln!(writer, "{}", formatted.join(" "))?;

    Ok(())
}

fn write_pairs<T, W>(writer: &mut W, groups: &[SourcePairs<T>], format: OutputFormat) -> Result<(), ExtentError>
where
    T: Endpoint + Display,
    W: Write + ?Sized,
{
    for group in groups {
        for (a, b) in &group.pairs {
            match format {
                OutputFormat::Lines => writeln!(writer, "{}{a} < {}{b}", group.outer, group.inner)?,
                _ => write_row(writer, &[*a, *b])?,
            }
        }
    }

    Ok(())
}

/// Write query output. No header is written.
///
/// `Rows` writes tab separated endpoints: lines flattened into one interval per row,
/// intersection tuples and containment pairs one per row. `Lines` writes one line or tuple per
/// row, and containment pairs as `outer(a) < inner(b)`.
pub fn write_output<T, W>(writer: &mut W, output: &QueryOutput<T>, format: OutputFormat) -> Result<(), ExtentError>
where
    T: Endpoint + Display + Serialize,
    W: Write + ?Sized,
{
    match (format, output) {
        (OutputFormat::Json, _) => {
            serde_json::to_writer_pretty(&mut *writer, output)?;
            writeln!(writer)?;
        },
        (_, QueryOutput::Pairs(groups)) => write_pairs(writer, groups, format)?,
        (OutputFormat::Rows, QueryOutput::Lines(lines)) => {
            for ival in lines.iter().flat_map(|line| line.iter()) {
                write_row(writer, std::slice::from_ref(ival))?;
            }
        },
        (OutputFormat::Rows, QueryOutput::Tuples(tuples)) => {
            for tuple in tuples {
                write_row(writer, tuple)?;
            }
        },
        (OutputFormat::Lines, QueryOutput::Lines(lines)) => {
            for line in lines {
                write_spaced(writer, line)?;
            }
        },
        (OutputFormat::Lines, QueryOutput::Tuples(tuples)) => {
            for tuple in tuples {
                write_spaced(writer, tuple)?;
            }
        },
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use crate::algebra::partition_gap_free;
    use crate::interval::Interval;
    use crate::io::OutputFormat;
    use crate::query::{QueryOutput, SourcePairs};
    use super::write_output;

    type Ival = Interval<i64>;

    fn lines_output() -> QueryOutput<i64> {
        QueryOutput::Lines(partition_gap_free(&[Ival::new(1, 5), Ival::new(3, 8), Ival::new(10, 12)]))
    }

    fn render(output: &QueryOutput<i64>, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_output(&mut buf, output, format).unwrap();

        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_rows() {
        assert_eq!(render(&lines_output(), OutputFormat::Rows), "1\t5\n3\t8\n10\t12\n");
    }

    #[test]
    fn test_lines() {
        assert_eq!(render(&lines_output(), OutputFormat::Lines), "(1,5) (3,8)\n(10,12)\n");
    }

    #[test]
    fn test_tuples() {
        let output = QueryOutput::Tuples(vec![smallvec![Ival::new(1, 5), Ival::new(3, 9)]]);

        assert_eq!(render(&output, OutputFormat::Rows), "1\t5\t3\t9\n");
        assert_eq!(render(&output, OutputFormat::Lines), "(1,5) (3,9)\n");
    }

    #[test]
    fn test_pairs() {
        let output = QueryOutput::Pairs(vec![SourcePairs {
            outer: "a".to_string(),
            inner: "b".to_string(),
            pairs: vec![(Ival::new(1, 10), Ival::new(2, 4)), (Ival::new(1, 10), Ival::new(3, 3))],
        }]);

        assert_eq!(render(&output, OutputFormat::Rows), "1\t10\t2\t4\n1\t10\t3\t3\n");
        assert_eq!(render(&output, OutputFormat::Lines), "a(1,10) < b(2,4)\na(1,10) < b(3,3)\n");

        let value: serde_json::Value = serde_json::from_str(&render(&output, OutputFormat::Json)).unwrap();
        assert_eq!(value, serde_json::json!({"pairs": [{
            "outer": "a",
            "inner": "b",
            "pairs": [[[1, 10], [2, 4]], [[1, 10], [3, 3]]],
        }]}));
    }

    #[test]
    fn test_json() {
        let json = render(&lines_output(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value, serde_json::json!({"lines": [[[1, 5], [3, 8]], [[10, 12]]]}));
    }
}
