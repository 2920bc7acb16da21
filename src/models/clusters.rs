//! The four precomputed popularity clusters.
//!
//! Clustering happens in an external model; only its published centers
//! live here, as opaque coordinates forwarded to the prediction API.

/// Centroid of one cluster in the external model's
/// (rating average, rating count) feature space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub average: f64,
    pub users_rated: f64,
}

/// One precomputed cluster: id, display description and centroid.
#[derive(Debug, Clone, Copy)]
pub struct ClusterDescriptor {
    pub id: u8,
    pub description: &'static str,
    pub centroid: Centroid,
}

/// Id ↔ description is a bijection over this fixed table.
pub static CLUSTERS: [ClusterDescriptor; 4] = [
    ClusterDescriptor {
        id: 0,
        description: "The Forgotten → Flops & unknown games",
        centroid: Centroid {
            average: 3.04758271e-01,
            users_rated: 9.10375542e-01,
        },
    },
    ClusterDescriptor {
        id: 1,
        description: "Hidden Treasures → Niche games underappreciated",
        centroid: Centroid {
            average: 6.66641581e+00,
            users_rated: 1.39517327e+02,
        },
    },
    ClusterDescriptor {
        id: 2,
        description: "Must Have → Popular well-rated classics",
        centroid: Centroid {
            average: 7.65193971e+00,
            users_rated: 6.26958406e+04,
        },
    },
    ClusterDescriptor {
        id: 3,
        description: "Challengers → Mid-tier popularity games",
        centroid: Centroid {
            average: 7.31720972e+00,
            users_rated: 1.62397414e+04,
        },
    },
];

/// Finds the unique cluster whose description matches.
///
/// Descriptions reach clients through the filter vocabulary endpoint, so
/// a miss is a table mismatch; callers surface it as an internal
/// invariant violation rather than a user error.
pub fn resolve_description(description: &str) -> Option<&'static ClusterDescriptor> {
    CLUSTERS.iter().find(|c| c.description == description)
}

/// Cluster descriptions in table order, for populating select widgets.
pub fn descriptions() -> impl Iterator<Item = &'static str> {
    CLUSTERS.iter().map(|c| c.description)
}
