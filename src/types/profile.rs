//! Static interpretation text for the known segments

/// Human-readable description of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterProfile {
    pub id: u32,
    pub name: &'static str,
    pub interpretation: &'static str,
    pub recommendations: &'static [&'static str],
}

/// Segment profiles, indexed by cluster id.
pub static CLUSTER_PROFILES: [ClusterProfile; 4] = [
    ClusterProfile {
        id: 0,
        name: "Loyal & Engaged",
        interpretation: "Core customer base with consistent engagement, mid-to-high frequency, \
            and mid-level monetary contribution. Lower recency indicates recent activity.",
        recommendations: &[
            "Implement exclusive loyalty programs and tiered rewards.",
            "Tailor personalized communications and product recommendations.",
            "Encourage feedback and leverage them as brand advocates.",
        ],
    },
    ClusterProfile {
        id: 1,
        name: "At-Risk & Dormant",
        interpretation: "Customers showing signs of disengagement: low monetary value, low \
            frequency, and high recency. They are either churning or already inactive.",
        recommendations: &[
            "Develop targeted re-engagement campaigns with compelling offers.",
            "Offer irresistible win-back incentives for a return purchase.",
            "Investigate reasons for inactivity to prevent future churn.",
        ],
    },
    ClusterProfile {
        id: 2,
        name: "Occasional Buyers",
        interpretation: "Customers who have made a purchase or two but lack consistent \
            engagement. Lower monetary value and frequency, with mid-level recency. Might be \
            price-sensitive or exploring options.",
        recommendations: &[
            "Introduce them to a wider range of products through personalized recommendations or bundles.",
            "Reinforce your value proposition to encourage future purchases.",
            "Offer targeted promotions aligned with their past behavior.",
        ],
    },
    ClusterProfile {
        id: 3,
        name: "Champions & VIPs",
        interpretation: "Most valuable and influential customer segment. Exceptional engagement \
            (high frequency), significant monetary contribution, and recent purchases. Highly \
            satisfied and brand loyal.",
        recommendations: &[
            "Provide exclusive VIP treatment, priority service, and early access to new offerings.",
            "Send personalized appreciation and recognition.",
            "Leverage their enthusiasm through robust referral programs.",
            "Engage them in product development or service improvement discussions.",
        ],
    },
];

impl ClusterProfile {
    /// Look up the profile for a cluster id. Unknown ids return `None`.
    pub fn lookup(id: u32) -> Option<&'static ClusterProfile> {
        CLUSTER_PROFILES.iter().find(|p| p.id == id)
    }

    /// All known profiles in id order.
    pub fn all() -> &'static [ClusterProfile] {
        &CLUSTER_PROFILES
    }
}
