//! Per-generation trace of a DE run.
//!
//! Only the best member of each generation is kept, never whole populations.

use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;

use crate::error::Result;
use crate::{CallbackAction, CallbackFn, DEIntermediate};

/// Records optimization progress via DE callbacks
#[derive(Debug, Clone)]
pub struct OptimizationRecorder {
    /// Function name, informational
    function_name: String,
    /// Shared records storage
    records: Rc<RefCell<Vec<GenerationRecord>>>,
}

/// A single generation record
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    pub generation: usize,
    /// Best member of the generation
    pub x: Vec<f64>,
    pub best_fitness: f64,
    /// Standard deviation of the population fitness
    pub convergence: f64,
    /// Whether this generation improved the best known result
    pub is_improvement: bool,
}

impl OptimizationRecorder {
    /// Create a new optimization recorder for the given function
    pub fn new(function_name: impl Into<String>) -> Self {
        Self { function_name: function_name.into(), records: Rc::new(RefCell::new(Vec::new())) }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Create a callback that records every generation and never stops the run
    pub fn create_callback(&self) -> CallbackFn {
        let records = Rc::clone(&self.records);
        Box::new(move |intermediate: &DEIntermediate| -> CallbackAction {
            let mut records = records.borrow_mut();
            let is_improvement = records
                .iter()
                .map(|r| r.best_fitness)
                .reduce(f64::min)
                .is_none_or(|best| intermediate.fun < best);
            records.push(GenerationRecord {
                generation: intermediate.iter,
                x: intermediate.x.to_vec(),
                best_fitness: intermediate.fun,
                convergence: intermediate.convergence,
                is_improvement,
            });
            CallbackAction::Continue
        })
    }

    /// Write the records as CSV: `generation,x0..x{n-1},best_fitness,convergence,is_improvement`
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let records = self.records.borrow();
        let mut wtr = csv::Writer::from_writer(writer);

        let num_dimensions = records.first().map_or(0, |r| r.x.len());
        let mut header = vec!["generation".to_string()];
        header.extend((0..num_dimensions).map(|i| format!("x{}", i)));
        header.extend(["best_fitness", "convergence", "is_improvement"].map(String::from));
        wtr.write_record(&header)?;

        for record in records.iter() {
            let mut row = vec![record.generation.to_string()];
            row.extend(record.x.iter().map(|xi| xi.to_string()));
            row.push(record.best_fitness.to_string());
            row.push(record.convergence.to_string());
            row.push(record.is_improvement.to_string());
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Save all recorded generations to a CSV file, creating parent directories
    pub fn save_to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.write_csv(file)?;
        log::info!("saved {} generations of {} to {}", self.num_generations(), self.function_name(), path.display());
        Ok(())
    }

    /// Get a copy of all recorded generations
    pub fn records(&self) -> Vec<GenerationRecord> {
        self.records.borrow().clone()
    }

    pub fn num_generations(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }

    /// Best vector and fitness over all recorded generations
    pub fn best_solution(&self) -> Option<(Vec<f64>, f64)> {
        self.records
            .borrow()
            .iter()
            .filter(|r| !r.best_fitness.is_nan())
            .min_by(|a, b| a.best_fitness.total_cmp(&b.best_fitness))
            .map(|r| (r.x.clone(), r.best_fitness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn step(iter: usize, x: Vec<f64>, fun: f64) -> DEIntermediate {
        DEIntermediate { x: Array1::from(x), fun, convergence: 0.1, iter }
    }

    #[test]
    fn test_callback_records_generations() {
        let recorder = OptimizationRecorder::new("test_function");
        assert_eq!(recorder.function_name(), "test_function");
        let mut callback = recorder.create_callback();

        assert!(matches!(callback(&step(1, vec![1.0, 2.0], 5.0)), CallbackAction::Continue));
        assert!(matches!(callback(&step(2, vec![0.5, 1.0], 1.25)), CallbackAction::Continue));
        assert!(matches!(callback(&step(3, vec![0.5, 1.0], 1.25)), CallbackAction::Continue));

        let records = recorder.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].generation, 1);
        assert_eq!(records[0].x, vec![1.0, 2.0]);
        assert!(records[0].is_improvement);
        assert!(records[1].is_improvement);
        assert!(!records[2].is_improvement);
        assert_eq!(recorder.best_solution(), Some((vec![0.5, 1.0], 1.25)));

        recorder.clear();
        assert_eq!(recorder.num_generations(), 0);
        assert_eq!(recorder.best_solution(), None);
    }

    #[test]
    fn test_csv_layout() {
        let recorder = OptimizationRecorder::new("csv");
        let mut callback = recorder.create_callback();
        callback(&step(1, vec![1.0, -2.0], 3.5));
        callback(&step(2, vec![0.25, 0.0], 0.5));

        let mut out = Vec::new();
        recorder.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "generation,x0,x1,best_fitness,convergence,is_improvement");
        assert_eq!(lines[1], "1,1,-2,3.5,0.1,true");
        assert_eq!(lines[2], "2,0.25,0,0.5,0.1,true");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_save_to_csv_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records").join("ackley.csv");
        let recorder = OptimizationRecorder::new("ackley");
        let mut callback = recorder.create_callback();
        callback(&step(1, vec![0.0, 0.0, 1.0], 2.0));

        recorder.save_to_csv(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("generation,x0,x1,x2,best_fitness"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_save_to_csv_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();
        let recorder = OptimizationRecorder::new("ackley");
        let err = recorder.save_to_csv(blocker.join("trace.csv")).unwrap_err();
        assert!(matches!(err, crate::OptimizerError::Io(_)), "{:?}", err);
    }
}
