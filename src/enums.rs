//! enum registry
//!
//! canonical wire enumerations used by the arize graphql api. each enum maps
//! its wire value, an optional label and any aliases to one variant; lookups
//! ignore case and surrounding whitespace.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// an enumeration with a fixed set of wire values
pub trait WireEnum: Copy + Sized + 'static {
    /// enum name used in error messages
    const KIND: &'static str;

    /// every variant, in declaration order
    fn variants() -> &'static [Self];

    /// exact string the api expects
    fn wire_value(self) -> &'static str;

    /// human friendly label
    fn label(self) -> Option<&'static str>;

    /// additional accepted spellings
    fn aliases(self) -> &'static [&'static str];

    /// lowercase lookup table, built once per enum
    fn lookup() -> &'static HashMap<String, Self>;

    /// canonical values followed by aliases, for error messages
    fn accepted() -> Vec<String> {
        let mut accepted: Vec<String> = Self::variants()
            .iter()
            .map(|v| v.wire_value().to_string())
            .collect();
        for variant in Self::variants() {
            accepted.extend(variant.aliases().iter().map(|a| a.to_string()));
        }
        accepted
    }
}

/// resolve a candidate string to a variant by wire value, label or alias
pub fn resolve<E: WireEnum>(candidate: &str) -> Result<E> {
    let key = candidate.trim().to_lowercase();
    E::lookup()
        .get(&key)
        .copied()
        .ok_or_else(|| Error::InvalidEnumValue {
            kind: E::KIND,
            value: candidate.to_string(),
            accepted: E::accepted(),
        })
}

/// build the lookup table; the first variant to claim a key keeps it
pub(crate) fn build_lookup<E: WireEnum>() -> HashMap<String, E> {
    let mut table = HashMap::new();
    for &variant in E::variants() {
        let keys = std::iter::once(variant.wire_value())
            .chain(variant.label())
            .chain(variant.aliases().iter().copied());
        for key in keys {
            table.entry(key.to_lowercase()).or_insert(variant);
        }
    }
    table
}

/// keys claimed by more than one variant
#[cfg(test)]
fn collisions<E: WireEnum + PartialEq>() -> Vec<String> {
    let mut owners: HashMap<String, E> = HashMap::new();
    let mut clashes = Vec::new();
    for &variant in E::variants() {
        let keys = std::iter::once(variant.wire_value())
            .chain(variant.label())
            .chain(variant.aliases().iter().copied());
        for key in keys {
            let key = key.to_lowercase();
            match owners.get(&key) {
                Some(owner) if *owner != variant => clashes.push(key),
                Some(_) => {}
                None => {
                    owners.insert(key, variant);
                }
            }
        }
    }
    clashes
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $wire:literal
                    $(, label = $label:literal)?
                    $(, aliases = [$($alias:literal),* $(,)?])?
            );+ $(;)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::enums::WireEnum for $name {
            const KIND: &'static str = stringify!($name);

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn wire_value(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            fn label(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => None$(.or(Some($label)))?,)+
                }
            }

            fn aliases(self) -> &'static [&'static str] {
                match self {
                    $(Self::$variant => &[$($($alias),*)?],)+
                }
            }

            fn lookup() -> &'static std::collections::HashMap<String, Self> {
                static LOOKUP: std::sync::OnceLock<std::collections::HashMap<String, $name>> =
                    std::sync::OnceLock::new();
                LOOKUP.get_or_init($crate::enums::build_lookup::<$name>)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                $crate::enums::resolve(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::enums::WireEnum::wire_value(*self))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::enums::WireEnum::wire_value(*self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                $crate::enums::resolve(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// kind of model registered in a space
    pub enum ModelType {
        ScoreCategorical = "score_categorical", label = "score categorical",
            aliases = ["classification", "binary", "categorical"];
        Numeric = "numeric", aliases = ["regression"];
        Ranking = "ranking";
        MultiClass = "multi_class", label = "multi class", aliases = ["multiclass"];
        ObjectDetection = "object_detection", label = "object detection";
        Generative = "generative", aliases = ["generative_llm", "llm"];
    }
}

wire_enum! {
    /// model data environment
    pub enum ModelEnvironment {
        Production = "production", aliases = ["prod"];
        Validation = "validation";
        Training = "training", aliases = ["train"];
        Tracing = "tracing", aliases = ["traces"];
    }
}

wire_enum! {
    pub enum MonitorCategory {
        Performance = "performance";
        DataQuality = "dataQuality", label = "data quality", aliases = ["data_quality"];
        Drift = "drift";
    }
}

wire_enum! {
    pub enum MonitorStatus {
        Triggered = "triggered";
        Cleared = "cleared";
        NoData = "noData", label = "no data", aliases = ["no_data"];
    }
}

wire_enum! {
    /// threshold comparison applied by a monitor
    pub enum ComparisonOperator {
        GreaterThan = "greaterThan", aliases = [">", "gt", "greater_than"];
        GreaterThanOrEqual = "greaterThanOrEqual", aliases = [">=", "gte"];
        LessThan = "lessThan", aliases = ["<", "lt", "less_than"];
        LessThanOrEqual = "lessThanOrEqual", aliases = ["<=", "lte"];
        Equals = "equals", aliases = ["==", "eq"];
        NotEquals = "notEquals", aliases = ["!=", "ne", "not_equals"];
    }
}

wire_enum! {
    pub enum PerformanceMetric {
        Accuracy = "accuracy";
        Auc = "auc";
        F1 = "f_1", aliases = ["f1", "f1_score"];
        Precision = "precision";
        Recall = "recall";
        LogLoss = "logLoss", aliases = ["log_loss"];
        Mae = "mae";
        Mape = "mape";
        Mse = "mse";
        Rmse = "rmse";
        Ndcg = "ndcg";
    }
}

wire_enum! {
    pub enum DriftMetric {
        Psi = "psi", label = "population stability index";
        Js = "js", label = "jensen shannon", aliases = ["jensen_shannon"];
        Kl = "kl", label = "kullback leibler", aliases = ["kullback_leibler"];
        Ks = "ks", label = "kolmogorov smirnov", aliases = ["kolmogorov_smirnov"];
    }
}

wire_enum! {
    pub enum DataQualityMetric {
        PercentEmpty = "percentEmpty", aliases = ["percent_empty", "null_rate"];
        Cardinality = "cardinality";
        Avg = "avg", aliases = ["average", "mean"];
        Count = "count";
        Sum = "sum";
        NewValues = "newValues", aliases = ["new_values"];
    }
}

wire_enum! {
    /// openinference span kind
    pub enum SpanKind {
        Llm = "LLM";
        Chain = "CHAIN";
        Tool = "TOOL";
        Retriever = "RETRIEVER";
        Embedding = "EMBEDDING";
        Agent = "AGENT";
        Reranker = "RERANKER";
        Guardrail = "GUARDRAIL";
        Evaluator = "EVALUATOR";
        Unknown = "UNKNOWN";
    }
}

wire_enum! {
    /// span status code
    pub enum StatusCode {
        Ok = "OK", aliases = ["success"];
        Error = "ERROR", aliases = ["err", "failed"];
        Unset = "UNSET";
    }
}

wire_enum! {
    pub enum SortDirection {
        Asc = "asc", aliases = ["ascending"];
        Desc = "desc", aliases = ["descending"];
    }
}
