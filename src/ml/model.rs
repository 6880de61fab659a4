use burn::{
    nn::{Initializer, Linear, LinearConfig},
    prelude::*,
    tensor::activation,
};

use crate::domain::hyper_params::HyperParams;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct DenseClassifierConfig {
    pub input_dim:   usize,
    pub num_classes: usize,
    #[config(default = 30)]
    pub units1:      usize,
    #[config(default = 20)]
    pub units2:      usize,
    #[config(default = 10)]
    pub units3:      usize,
    #[config(default = 5)]
    pub units4:      usize,
    /// L1 factor applied to every hidden layer's activations.
    #[config(default = 1e-5)]
    pub activity_l1: f64,
}

impl DenseClassifierConfig {
    /// The tuned topology: first two widths come from `hp`, the rest are fixed.
    pub fn from_hyper_params(input_dim: usize, num_classes: usize, hp: &HyperParams) -> Self {
        Self::new(input_dim, num_classes)
            .with_units1(hp.units1)
            .with_units2(hp.units2)
    }

    /// (name, fan_in, fan_out) for every dense layer, input to output.
    pub fn layers(&self) -> Vec<(String, usize, usize)> {
        let widths = [
            self.input_dim,
            self.units1,
            self.units2,
            self.units3,
            self.units4,
            self.num_classes,
        ];
        let last = widths.len() - 2;
        widths
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let name = match i {
                    0 => "dense".to_string(),
                    i if i == last => "y_pred".to_string(),
                    i => format!("dense_{i}"),
                };
                (name, w[0], w[1])
            })
            .collect()
    }

    /// Weights plus biases over all layers.
    pub fn param_count(&self) -> usize {
        self.layers().iter().map(|(_, i, o)| i * o + o).sum()
    }

    /// Keras-style table of layers, output shapes and parameter counts.
    pub fn summary(&self) -> String {
        let rule_thin  = "_".repeat(62);
        let rule_thick = "=".repeat(62);

        let mut out = String::new();
        out.push_str("Model: \"dense_classifier\"\n");
        out.push_str(&rule_thin);
        out.push('\n');
        out.push_str(&format!(" {:<24}{:<22}{:>10}\n", "Layer (type)", "Output Shape", "Param #"));
        out.push_str(&rule_thick);
        out.push('\n');
        for (name, fan_in, fan_out) in self.layers() {
            out.push_str(&format!(
                " {:<24}{:<22}{:>10}\n",
                format!("{name} (Dense)"),
                format!("(None, {fan_out})"),
                fan_in * fan_out + fan_out,
            ));
        }
        out.push_str(&rule_thick);
        out.push('\n');
        out.push_str(&format!("Total params: {}\n", self.param_count()));
        out.push_str(&format!("Trainable params: {}\n", self.param_count()));
        out
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> DenseClassifier<B> {
        let mut layers: Vec<Linear<B>> = self
            .layers()
            .into_iter()
            .map(|(_, fan_in, fan_out)| {
                LinearConfig::new(fan_in, fan_out)
                    .with_initializer(Initializer::XavierUniform { gain: 1.0 })
                    .init(device)
            })
            .collect();

        // layers() always yields five entries
        let output = layers.split_off(layers.len() - 1).remove(0);

        DenseClassifier {
            hidden: layers,
            output,
            activity_l1: self.activity_l1,
        }
    }
}

/// Four ReLU hidden layers and a softmax output layer.
#[derive(Module, Debug)]
pub struct DenseClassifier<B: Backend> {
    pub hidden:      Vec<Linear<B>>,
    pub output:      Linear<B>,
    pub activity_l1: f64,
}

impl<B: Backend> DenseClassifier<B> {
    /// x: [batch, input_dim] → (logits [batch, num_classes], activity penalty [1])
    ///
    /// The penalty is `activity_l1 * Σ|h| / batch` over every hidden activation.
    pub fn forward_logits(&self, x: Tensor<B, 2>) -> (Tensor<B, 2>, Tensor<B, 1>) {
        let batch_size = x.dims()[0].max(1);
        let mut penalty = Tensor::<B, 1>::zeros([1], &x.device());

        let mut h = x;
        for layer in &self.hidden {
            h = activation::relu(layer.forward(h));
            penalty = penalty + h.clone().abs().sum();
        }

        let penalty = penalty.mul_scalar(self.activity_l1 / batch_size as f64);
        (self.output.forward(h), penalty)
    }

    /// Class probabilities, rows sum to 1.
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let (logits, _) = self.forward_logits(x);
        activation::softmax(logits, 1)
    }

    /// Categorical cross-entropy against one-hot `targets` plus the activity penalty.
    /// Returns (loss [1], logits [batch, num_classes]).
    pub fn forward_loss(
        &self,
        x:       Tensor<B, 2>,
        targets: Tensor<B, 2>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let (logits, penalty) = self.forward_logits(x);
        let ce = activation::log_softmax(logits.clone(), 1)
            .mul(targets)
            .sum_dim(1)
            .mean()
            .neg();
        (ce + penalty, logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray;

    #[test]
    fn test_default_topology() {
        let cfg    = DenseClassifierConfig::new(4, 3);
        let widths: Vec<(usize, usize)> = cfg.layers().iter().map(|(_, i, o)| (*i, *o)).collect();
        assert_eq!(widths, vec![(4, 30), (30, 20), (20, 10), (10, 5), (5, 3)]);
        assert_eq!(cfg.layers().last().map(|l| l.0.as_str()), Some("y_pred"));
    }

    #[test]
    fn test_tuned_topology_replaces_first_two_widths() {
        let hp  = HyperParams { units1: 64, units2: 8, learning_rate: 1e-3 };
        let cfg = DenseClassifierConfig::from_hyper_params(7, 2, &hp);
        assert_eq!(cfg.units1, 64);
        assert_eq!(cfg.units2, 8);
        assert_eq!(cfg.units3, 10);
        assert_eq!(cfg.units4, 5);
    }

    #[test]
    fn test_param_count_matches_model() {
        let _lock = crate::ml::backend_lock();
        let cfg   = DenseClassifierConfig::new(4, 3);
        let model = cfg.init::<B>(&Default::default());
        // 4*30+30 + 30*20+20 + 20*10+10 + 10*5+5 + 5*3+3
        assert_eq!(cfg.param_count(), 1053);
        assert_eq!(model.num_params(), cfg.param_count());
        assert!(cfg.summary().contains("Total params: 1053"));
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let _lock  = crate::ml::backend_lock();
        let device = Default::default();
        let model  = DenseClassifierConfig::new(3, 4).init::<B>(&device);
        let x      = Tensor::<B, 2>::random([6, 3], burn::tensor::Distribution::Default, &device);

        let probs = model.forward(x);
        assert_eq!(probs.dims(), [6, 4]);

        let sums: Vec<f32> = probs.sum_dim(1).into_data().to_vec().unwrap();
        for s in sums {
            assert!((s - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_loss_is_finite_and_positive() {
        let _lock   = crate::ml::backend_lock();
        let device  = Default::default();
        let model   = DenseClassifierConfig::new(2, 2).init::<B>(&device);
        let x       = Tensor::<B, 2>::from_floats([[0.5, -1.0], [1.5, 2.0]], &device);
        let targets = Tensor::<B, 2>::from_floats([[1.0, 0.0], [0.0, 1.0]], &device);

        let (loss, logits) = model.forward_loss(x, targets);
        let loss: f32      = loss.into_scalar().elem();

        assert!(loss.is_finite());
        assert!(loss > 0.0);
        assert_eq!(logits.dims(), [2, 2]);
    }
}
