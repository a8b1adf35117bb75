#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! A small library to synthesize and draw textbook loss curves that illustrate overfitting.
//!
//! The [`synthesize_curves`] function builds a [`Curves`] value holding a sequence of epochs, a smoothly decreasing training loss,
//! and a validation loss that follows the training loss for a while before turning upward.
//!
//! The [chart] module draws those curves on a single chart and saves it as a PNG.
//!
//! ## What does the chart show?
//! The training loss is `1 / (0.1 * epoch + 0.5)`, which keeps falling for as long as training continues.
//! The validation loss matches it until the divergence point, then climbs in a straight line.
//! The gap that opens between the two curves is the classic signature of a model memorizing its training set
//! instead of learning something that generalizes.
//!
//! # Examples
//! Synthesize the default curves and save the chart to `overfitting.png`:
//! ```no_run
//! use overfit_plot::{chart::{render_chart, ChartOptions}, synthesize_curves, CurveOptions};
//!
//! let curves = synthesize_curves(&CurveOptions::default());
//! assert_eq!(curves.epochs.len(), 50);
//!
//! render_chart(&curves, &ChartOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Draws [`Curves`] to an image file with [`chart::render_chart`].
pub mod chart;
/// Options for shaping the curves produced by [`synthesize_curves`].
pub mod curve_options;
/// The error type returned by [`chart::render_chart`].
pub mod render_error;

pub use curve_options::{CurveOptions, CurveOptionsError};

use log::debug;
use serde::{Deserialize, Serialize};

/// The synthetic training history drawn on the chart.
///
/// All three sequences have the same length, one entry per epoch.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Curves {
    /// one-indexed epoch numbers, in order
    pub epochs: Vec<u32>,
    /// training loss for each epoch
    pub training_loss: Vec<f64>,
    /// validation loss for each epoch
    pub validation_loss: Vec<f64>,
}

/// Build the epoch, training-loss and validation-loss sequences described by `options`.
///
/// * epochs run from 1 to `options.num_epochs` inclusive
/// * the training loss at epoch `e` is `1 / (options.decay_rate * e + options.offset)`
/// * the validation loss is a copy of the training loss, except that every entry from the zero-based index `options.divergence_index` onward
///   is replaced by evenly spaced values running from the training loss at that index to the same value plus `options.validation_rise`
///
/// The result depends only on `options`, so calling this twice with the same options gives identical curves.
///
/// # Example
/// ```
/// use overfit_plot::{synthesize_curves, CurveOptions};
///
/// let curves = synthesize_curves(&CurveOptions::default());
/// // the curves agree before the divergence point...
/// assert_eq!(curves.training_loss[..15], curves.validation_loss[..15]);
/// // ...and end 0.3 above the divergence point
/// let last = curves.validation_loss[49];
/// assert!((last - (curves.training_loss[15] + 0.3)).abs() < 1e-12);
/// ```
pub fn synthesize_curves(options: &CurveOptions) -> Curves {
    let epochs: Vec<u32> = (1..=options.num_epochs).collect();
    let training_loss: Vec<f64> = epochs
        .iter()
        .map(|&epoch| training_loss(epoch, options))
        .collect();

    let mut validation_loss = training_loss.clone();
    if options.divergence_index < validation_loss.len() {
        let start = validation_loss[options.divergence_index];
        let ramp = linspace(
            start,
            start + options.validation_rise,
            validation_loss.len() - options.divergence_index,
        );
        validation_loss[options.divergence_index..].copy_from_slice(&ramp);
    }
    debug!(
        "synthesized {} epochs, validation diverges at epoch {}",
        epochs.len(),
        options.divergence_index + 1
    );

    Curves {
        epochs,
        training_loss,
        validation_loss,
    }
}

/// The training loss at the given (one-indexed) epoch: `1 / (decay_rate * epoch + offset)`.
pub fn training_loss(epoch: u32, options: &CurveOptions) -> f64 {
    1.0 / (options.decay_rate * epoch as f64 + options.offset)
}

/// `count` evenly spaced values from `start` to `stop`, both inclusive.
///
/// The last value is exactly `stop`. A `count` of 1 yields just `start`, and a `count` of 0 yields an empty vector.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            // avoid accumulated rounding on the endpoint
            values[count - 1] = stop;
            values
        }
    }
}
