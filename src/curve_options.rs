use std::fmt;

/// Used by [`synthesize_curves`](crate::synthesize_curves) to determine the shape of the generated curves.
#[derive(Clone, PartialEq, Debug)]
pub struct CurveOptions {
    /// number of epochs to generate. Epochs are one-indexed, so the epoch sequence is `1..=num_epochs`
    pub num_epochs: u32,
    /// the zero-based index from which the validation curve stops following the training curve and starts rising.
    /// The validation value at this index still equals the training value; every later value is strictly greater
    pub divergence_index: usize,
    /// the `a` in the training loss `1 / (a * epoch + b)`
    pub decay_rate: f64,
    /// the `b` in the training loss `1 / (a * epoch + b)`
    pub offset: f64,
    /// how far the validation loss climbs between `divergence_index` and the final epoch
    pub validation_rise: f64,
}

impl CurveOptions {
    /// Create a new CurveOptions struct with the given parameters.
    /// # Errors
    /// Returns [`CurveOptionsError`] error if...
    /// * `num_epochs` is zero,
    /// * `divergence_index` does not point inside the epoch range,
    /// * `validation_rise` is not a positive number,
    /// * `decay_rate` is negative or `offset` is not positive, either of which could make the training loss non-positive or infinite.
    pub fn new(
        num_epochs: u32,
        divergence_index: usize,
        decay_rate: f64,
        offset: f64,
        validation_rise: f64,
    ) -> Result<CurveOptions, CurveOptionsError> {
        if num_epochs == 0 {
            return Err(CurveOptionsError::NoEpochs);
        }
        if divergence_index >= num_epochs as usize {
            return Err(CurveOptionsError::DivergenceOutOfRange {
                divergence_index,
                num_epochs,
            });
        }
        if !validation_rise.is_finite() || validation_rise <= 0.0 {
            return Err(CurveOptionsError::NonPositiveRise(validation_rise));
        }
        if !decay_rate.is_finite() || !offset.is_finite() || decay_rate < 0.0 || offset <= 0.0 {
            return Err(CurveOptionsError::NonPositiveLoss { decay_rate, offset });
        }
        Ok(CurveOptions {
            num_epochs,
            divergence_index,
            decay_rate,
            offset,
            validation_rise,
        })
    }
}

impl Default for CurveOptions {
    /// Returns a CurveOptions struct with the following default values:
    /// * `num_epochs`: 50
    /// * `divergence_index`: 15
    /// * `decay_rate`: 0.1
    /// * `offset`: 0.5
    /// * `validation_rise`: 0.3
    fn default() -> Self {
        CurveOptions {
            num_epochs: 50,
            divergence_index: 15,
            decay_rate: 0.1,
            offset: 0.5,
            validation_rise: 0.3,
        }
    }
}

/// Errors that can occur when creating a new CurveOptions struct
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveOptionsError {
    /// No epochs were requested
    NoEpochs,
    /// The divergence index was past the last epoch
    DivergenceOutOfRange {
        /// The divergence index received
        divergence_index: usize,
        /// The number of epochs received
        num_epochs: u32,
    },
    /// The validation rise was zero, negative, or not a number, so the validation tail would not be strictly increasing
    NonPositiveRise(f64),
    /// The decay rate and offset could produce a training loss that is not positive and finite
    NonPositiveLoss {
        /// The decay rate received
        decay_rate: f64,
        /// The offset received
        offset: f64,
    },
}

impl fmt::Display for CurveOptionsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CurveOptionsError::NoEpochs => write!(f, "At least one epoch is required"),
            CurveOptionsError::DivergenceOutOfRange {
                divergence_index,
                num_epochs,
            } => write!(
                f,
                "Divergence index {} is out of range for {} epochs",
                divergence_index, num_epochs
            ),
            CurveOptionsError::NonPositiveRise(rise) => {
                write!(f, "Validation rise must be positive, got {}", rise)
            }
            CurveOptionsError::NonPositiveLoss { decay_rate, offset } => write!(
                f,
                "Decay rate {} and offset {} do not give a positive training loss; \
                 the decay rate must be non-negative and the offset positive",
                decay_rate, offset
            ),
        }
    }
}

impl std::error::Error for CurveOptionsError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_matches_new() {
        let built = CurveOptions::new(50, 15, 0.1, 0.5, 0.3).unwrap();
        assert_eq!(built, CurveOptions::default());
    }

    #[test]
    fn zero_epochs_rejected() {
        assert_eq!(
            CurveOptions::new(0, 0, 0.1, 0.5, 0.3),
            Err(CurveOptionsError::NoEpochs)
        );
    }

    #[test]
    fn divergence_past_end_rejected() {
        assert_eq!(
            CurveOptions::new(10, 10, 0.1, 0.5, 0.3),
            Err(CurveOptionsError::DivergenceOutOfRange {
                divergence_index: 10,
                num_epochs: 10
            })
        );
        assert!(CurveOptions::new(10, 9, 0.1, 0.5, 0.3).is_ok());
    }

    #[test]
    fn largest_epoch_count_keeps_full_range() {
        // the divergence check must see every epoch, with no truncation at the top of the range
        let last = u32::MAX as usize - 1;
        let options = CurveOptions::new(u32::MAX, last, 0.1, 0.5, 0.3).unwrap();
        assert_eq!(options.num_epochs, u32::MAX);
        assert_eq!(options.divergence_index, last);
        assert_eq!(
            CurveOptions::new(u32::MAX, last + 1, 0.1, 0.5, 0.3),
            Err(CurveOptionsError::DivergenceOutOfRange {
                divergence_index: last + 1,
                num_epochs: u32::MAX
            })
        );
    }

    #[test]
    fn non_positive_rise_rejected() {
        assert_eq!(
            CurveOptions::new(50, 15, 0.1, 0.5, 0.0),
            Err(CurveOptionsError::NonPositiveRise(0.0))
        );
        assert_eq!(
            CurveOptions::new(50, 15, 0.1, 0.5, -0.3),
            Err(CurveOptionsError::NonPositiveRise(-0.3))
        );
        assert!(CurveOptions::new(50, 15, 0.1, 0.5, f64::NAN).is_err());
    }

    #[test]
    fn bad_loss_parameters_rejected() {
        assert!(matches!(
            CurveOptions::new(50, 15, -0.1, 0.5, 0.3),
            Err(CurveOptionsError::NonPositiveLoss { .. })
        ));
        assert!(matches!(
            CurveOptions::new(50, 15, 0.1, 0.0, 0.3),
            Err(CurveOptionsError::NonPositiveLoss { .. })
        ));
        assert!(matches!(
            CurveOptions::new(50, 15, f64::INFINITY, 0.5, 0.3),
            Err(CurveOptionsError::NonPositiveLoss { .. })
        ));
        // a flat training curve is still positive
        assert!(CurveOptions::new(50, 15, 0.0, 0.5, 0.3).is_ok());
    }

    #[test]
    fn error_display() {
        let err = CurveOptionsError::DivergenceOutOfRange {
            divergence_index: 60,
            num_epochs: 50,
        };
        assert_eq!(
            err.to_string(),
            "Divergence index 60 is out of range for 50 epochs"
        );
    }
}
