//! The plan recommendation engine.
//!
//! A pure, synchronous evaluation over a snapshot of subscriptions and a
//! usage profile. Each subscription is evaluated independently against every
//! rule; all matching rules fire (a single subscription can legitimately
//! attract a downgrade, a bundle, and several switch suggestions at once).
//! Unknown services and unknown plans are skipped silently: one malformed
//! subscription never blocks suggestions for the rest.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::{PlanTier, ServiceCatalog, ServiceEntry, FULL_HD, PREMIUM_TIER};
use crate::subscriptions::record::{round2, Subscription};

use super::recommendation::{Action, Recommendation};
use super::usage::UsageProfile;

/// Average daily hours above which only full-HD tiers are acceptable
/// downgrade targets.
const HD_HOURS_THRESHOLD: f64 = 10.0;
/// Average daily hours above which the top tier pays off.
const HEAVY_HOURS_THRESHOLD: f64 = 60.0;
/// Average daily hours below which cancelling is suggested.
const LIGHT_HOURS_THRESHOLD: f64 = 2.0;

/// Fixed referral credit used by the fallback placeholder.
const REFERRAL_BONUS: f64 = 50.0;
/// Service suggested by the fallback try placeholder.
const FALLBACK_TRIAL_SERVICE: &str = "Showmax";

/// Rule-based engine deriving plan suggestions from a static catalog.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: ServiceCatalog,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ServiceCatalog::default_za())
    }
}

impl RecommendationEngine {
    #[must_use]
    pub fn new(catalog: ServiceCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Evaluate all rules over the subscription snapshot.
    ///
    /// Returns suggestions sorted by monthly savings, descending; the sort is
    /// stable, so ties keep rule/input order. If nothing fires, the two fixed
    /// placeholder suggestions are returned instead so the panel is never
    /// empty.
    #[must_use]
    pub fn evaluate(
        &self,
        subscriptions: &[Subscription],
        profile: &UsageProfile,
    ) -> Vec<Recommendation> {
        let held: HashSet<String> = subscriptions
            .iter()
            .map(|s| ServiceCatalog::key_for(&s.name))
            .collect();

        let mut recommendations = Vec::new();
        for subscription in subscriptions {
            self.evaluate_subscription(subscription, profile, &held, &mut recommendations);
        }

        if recommendations.is_empty() {
            recommendations = fallback_recommendations();
        }

        recommendations
            .sort_by(|a, b| b.monthly_savings().total_cmp(&a.monthly_savings()));
        recommendations
    }

    fn evaluate_subscription(
        &self,
        subscription: &Subscription,
        profile: &UsageProfile,
        held: &HashSet<String>,
        out: &mut Vec<Recommendation>,
    ) {
        let Some(entry) = self.catalog.get(&subscription.name) else {
            debug!(service = %subscription.name, "service not in catalog, skipping");
            return;
        };
        let Some(current) = entry.tier(&subscription.plan) else {
            debug!(
                service = %subscription.name,
                plan = %subscription.plan,
                "plan is not a catalog tier, skipping"
            );
            return;
        };

        self.check_downgrade(entry, current, profile, out);
        self.check_upgrade(entry, current, profile, out);
        self.check_cancel(entry, current, profile, out);
        self.check_bundles(entry, current, held, out);
        self.check_switches(entry, current, out);
    }

    /// Rule 1: first declared tier that covers the user's devices (and
    /// resolution needs, for heavy viewers) at a lower price.
    fn check_downgrade(
        &self,
        entry: &ServiceEntry,
        current: &PlanTier,
        profile: &UsageProfile,
        out: &mut Vec<Recommendation>,
    ) {
        let candidate = entry.tiers.iter().find(|tier| {
            let screens_ok = tier
                .max_screens
                .is_some_and(|max| profile.devices_used as u64 <= u64::from(max));
            let resolution_ok = profile.monthly_hours <= HD_HOURS_THRESHOLD
                || tier.resolution.as_deref() == Some(FULL_HD);
            screens_ok && resolution_ok && tier.price < current.price
        });

        if let Some(tier) = candidate {
            let monthly_savings = current.price - tier.price;
            out.push(Recommendation {
                service: entry.name.clone(),
                action: Action::Downgrade {
                    from_plan: current.name.clone(),
                    to_plan: tier.name.clone(),
                    monthly_savings,
                },
                rationale: format!(
                    "Your usage fits the {} plan, saving {:.2} per month",
                    tier.name, monthly_savings
                ),
            });
        }
    }

    /// Rule 2: heavy viewers not already on the top tier.
    fn check_upgrade(
        &self,
        entry: &ServiceEntry,
        current: &PlanTier,
        profile: &UsageProfile,
        out: &mut Vec<Recommendation>,
    ) {
        if profile.monthly_hours <= HEAVY_HOURS_THRESHOLD || current.name == PREMIUM_TIER {
            return;
        }
        let Some(premium) = entry.tier(PREMIUM_TIER) else {
            return;
        };
        if premium.price > current.price {
            out.push(Recommendation {
                service: entry.name.clone(),
                action: Action::Upgrade {
                    from_plan: current.name.clone(),
                    to_plan: premium.name.clone(),
                    extra_cost: premium.price - current.price,
                },
                rationale: format!(
                    "You watch heavily; {} unlocks the best quality for {:.2} more per month",
                    premium.name,
                    premium.price - current.price
                ),
            });
        }
    }

    /// Rule 3: barely-used subscriptions.
    fn check_cancel(
        &self,
        entry: &ServiceEntry,
        current: &PlanTier,
        profile: &UsageProfile,
        out: &mut Vec<Recommendation>,
    ) {
        if profile.monthly_hours < LIGHT_HOURS_THRESHOLD {
            out.push(Recommendation {
                service: entry.name.clone(),
                action: Action::Cancel {
                    monthly_savings: current.price,
                },
                rationale: format!(
                    "You barely use {}; cancelling saves {:.2} per month",
                    entry.name, current.price
                ),
            });
        }
    }

    /// Rule 4: bundle discounts with partner services the user already holds.
    fn check_bundles(
        &self,
        entry: &ServiceEntry,
        current: &PlanTier,
        held: &HashSet<String>,
        out: &mut Vec<Recommendation>,
    ) {
        for discount in &entry.bundle_discounts {
            if !held.contains(&discount.partner) {
                continue;
            }
            let partner_name = self
                .catalog
                .get(&discount.partner)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| discount.partner.clone());
            let estimated_savings = round2(current.price * discount.percent / 100.0);
            out.push(Recommendation {
                service: entry.name.clone(),
                action: Action::Bundle {
                    with_service: partner_name.clone(),
                    discount_percent: discount.percent,
                    estimated_savings,
                },
                rationale: format!(
                    "Bundle {} with {} for a {}% discount, about {:.2} per month",
                    entry.name, partner_name, discount.percent, estimated_savings
                ),
            });
        }
    }

    /// Rule 5: every other catalog service with a cheaper entry tier.
    fn check_switches(&self, entry: &ServiceEntry, current: &PlanTier, out: &mut Vec<Recommendation>) {
        let self_key = ServiceCatalog::key_for(&entry.name);
        for other in self.catalog.iter() {
            if ServiceCatalog::key_for(&other.name) == self_key {
                continue;
            }
            let Some(cheapest) = other.cheapest_tier() else {
                continue;
            };
            if cheapest.price < current.price {
                out.push(Recommendation {
                    service: entry.name.clone(),
                    action: Action::Switch {
                        to_service: other.name.clone(),
                        to_plan: cheapest.name.clone(),
                        monthly_savings: current.price - cheapest.price,
                    },
                    rationale: format!(
                        "{} {} costs less than your current {} plan",
                        other.name, cheapest.name, current.name
                    ),
                });
            }
        }
    }
}

/// Fixed placeholder suggestions so the panel never renders empty.
fn fallback_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            service: FALLBACK_TRIAL_SERVICE.to_string(),
            action: Action::Try,
            rationale: format!("Try {} free for 14 days", FALLBACK_TRIAL_SERVICE),
        },
        Recommendation {
            service: "Referral programme".to_string(),
            action: Action::Refer {
                monthly_savings: REFERRAL_BONUS,
            },
            rationale: format!(
                "Refer a friend and earn {:.2} off your next bill",
                REFERRAL_BONUS
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::record::{BillingCycle, Category, NewSubscription};
    use chrono::{NaiveDate, Utc};

    fn subscription(name: &str, plan: &str, cost: f64) -> Subscription {
        NewSubscription {
            name: name.to_string(),
            plan: plan.to_string(),
            cost,
            billing_cycle: BillingCycle::Monthly,
            category: Category::Video,
            next_payment_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            notes: String::new(),
        }
        .into_record(Utc::now())
        .unwrap()
    }

    fn profile(monthly_hours: f64, devices_used: usize) -> UsageProfile {
        UsageProfile {
            monthly_hours,
            devices_used,
            content_types: Default::default(),
            sharing: false,
        }
    }

    fn actions_for<'a>(recs: &'a [Recommendation], service: &str) -> Vec<&'a Action> {
        recs.iter()
            .filter(|r| r.service == service)
            .map(|r| &r.action)
            .collect()
    }

    #[test]
    fn test_downgrade_picks_first_qualifying_cheaper_tier() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Netflix", "Premium", 299.0)];
        let recs = engine.evaluate(&subs, &profile(5.0, 1));

        let downgrade = recs
            .iter()
            .find(|r| matches!(r.action, Action::Downgrade { .. }))
            .expect("downgrade expected");
        assert_eq!(downgrade.service, "Netflix");
        match &downgrade.action {
            Action::Downgrade {
                from_plan,
                to_plan,
                monthly_savings,
            } => {
                assert_eq!(from_plan, "Premium");
                // Light viewing: any resolution qualifies, so the first
                // declared cheaper tier wins.
                assert_eq!(to_plan, "Mobile");
                assert_eq!(*monthly_savings, 200.0);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_downgrade_requires_full_hd_for_heavy_viewers() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Netflix", "Premium", 299.0)];
        let recs = engine.evaluate(&subs, &profile(12.0, 1));

        let downgrade = recs
            .iter()
            .find(|r| matches!(r.action, Action::Downgrade { .. }))
            .expect("downgrade expected");
        match &downgrade.action {
            Action::Downgrade { to_plan, .. } => assert_eq!(to_plan, "Standard"),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_downgrade_respects_device_count() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Netflix", "Premium", 299.0)];
        // Three devices exceed Mobile/Basic (1 screen) and Standard (2).
        let recs = engine.evaluate(&subs, &profile(5.0, 3));
        assert!(
            !recs
                .iter()
                .any(|r| matches!(r.action, Action::Downgrade { .. })),
            "no tier covers 3 devices below Premium"
        );
    }

    #[test]
    fn test_upgrade_to_premium_for_heavy_viewers() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Netflix", "Basic", 139.0)];
        let recs = engine.evaluate(&subs, &profile(70.0, 1));

        let upgrade = recs
            .iter()
            .find(|r| matches!(r.action, Action::Upgrade { .. }))
            .expect("upgrade expected");
        match &upgrade.action {
            Action::Upgrade {
                from_plan,
                to_plan,
                extra_cost,
            } => {
                assert_eq!(from_plan, "Basic");
                assert_eq!(to_plan, "Premium");
                assert_eq!(*extra_cost, 160.0);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_no_upgrade_when_already_premium() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Netflix", "Premium", 299.0)];
        let recs = engine.evaluate(&subs, &profile(70.0, 4));
        assert!(!recs.iter().any(|r| matches!(r.action, Action::Upgrade { .. })));
    }

    #[test]
    fn test_cancel_for_light_usage() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Netflix", "Standard", 199.0)];
        let recs = engine.evaluate(&subs, &profile(1.0, 1));

        let cancel = recs
            .iter()
            .find(|r| matches!(r.action, Action::Cancel { .. }))
            .expect("cancel expected");
        match &cancel.action {
            Action::Cancel { monthly_savings } => assert_eq!(*monthly_savings, 199.0),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_bundle_with_held_partner() {
        let engine = RecommendationEngine::default();
        let subs = vec![
            subscription("Showmax", "Standard", 99.0),
            subscription("DStv", "Compact", 449.0),
        ];
        let recs = engine.evaluate(&subs, &profile(5.0, 1));

        let bundle = recs
            .iter()
            .find(|r| r.service == "Showmax" && matches!(r.action, Action::Bundle { .. }))
            .expect("bundle expected");
        match &bundle.action {
            Action::Bundle {
                with_service,
                discount_percent,
                estimated_savings,
            } => {
                assert_eq!(with_service, "DStv");
                assert_eq!(*discount_percent, 20.0);
                // 20% of the Showmax Standard price, rounded to 2 dp.
                assert_eq!(*estimated_savings, 19.8);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_no_bundle_without_partner() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Showmax", "Standard", 99.0)];
        let recs = engine.evaluate(&subs, &profile(5.0, 1));
        assert!(!recs.iter().any(|r| matches!(r.action, Action::Bundle { .. })));
    }

    #[test]
    fn test_switch_fans_out_per_cheaper_service() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Netflix", "Premium", 299.0)];
        let recs = engine.evaluate(&subs, &profile(5.0, 1));

        let switches: Vec<&Recommendation> = recs
            .iter()
            .filter(|r| matches!(r.action, Action::Switch { .. }))
            .collect();
        // Every other catalog service has a cheapest tier under 299.
        assert_eq!(switches.len(), engine.catalog().len() - 1);
        for rec in switches {
            match &rec.action {
                Action::Switch {
                    to_service,
                    monthly_savings,
                    ..
                } => {
                    assert_ne!(to_service, "Netflix");
                    assert!(*monthly_savings > 0.0);
                }
                other => panic!("unexpected action {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_service_skipped_silently() {
        let engine = RecommendationEngine::default();
        let subs = vec![
            subscription("Crunchyroll", "Mega Fan", 120.0),
            subscription("Netflix", "Standard", 199.0),
        ];
        let recs = engine.evaluate(&subs, &profile(1.0, 1));

        assert!(recs.iter().all(|r| r.service != "Crunchyroll"));
        // The well-formed subscription still produces suggestions.
        assert!(recs.iter().any(|r| r.service == "Netflix"));
    }

    #[test]
    fn test_unknown_plan_skips_all_rules_for_subscription() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Netflix", "Ultra", 399.0)];
        let recs = engine.evaluate(&subs, &profile(1.0, 1));
        // Tier never resolved: falls through to the placeholders.
        assert_eq!(recs.len(), 2);
        assert!(actions_for(&recs, "Netflix").is_empty());
    }

    #[test]
    fn test_empty_input_yields_fixed_placeholders() {
        let engine = RecommendationEngine::default();
        let recs = engine.evaluate(&[], &profile(0.0, 0));

        assert_eq!(recs.len(), 2);
        // Sorted by savings: the referral credit outranks the zero-savings
        // trial suggestion.
        assert!(matches!(
            recs[0].action,
            Action::Refer {
                monthly_savings
            } if monthly_savings == 50.0
        ));
        assert!(matches!(recs[1].action, Action::Try));
        assert_eq!(recs[1].service, "Showmax");
    }

    #[test]
    fn test_output_sorted_by_savings_descending() {
        let engine = RecommendationEngine::default();
        let subs = vec![
            subscription("Spotify", "Family", 109.99),
            subscription("Netflix", "Premium", 299.0),
        ];
        let recs = engine.evaluate(&subs, &profile(5.0, 1));

        let savings: Vec<f64> = recs.iter().map(Recommendation::monthly_savings).collect();
        for pair in savings.windows(2) {
            assert!(pair[0] >= pair[1], "not sorted: {:?}", savings);
        }
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        // Two identical subscriptions produce identical suggestion sets; the
        // tie must preserve input order.
        let catalog = ServiceCatalog::builder()
            .service("Alpha")
            .tier("Only", 100.0, Some(FULL_HD), Some(2))
            .done()
            .service("Beta")
            .tier("Only", 100.0, Some(FULL_HD), Some(2))
            .done()
            .service("Gamma")
            .tier("Only", 10.0, Some(FULL_HD), Some(2))
            .done()
            .build();
        let engine = RecommendationEngine::new(catalog);

        let subs = vec![
            subscription("Alpha", "Only", 100.0),
            subscription("Beta", "Only", 100.0),
        ];
        // Both emit a single SWITCH to Gamma with savings 90.
        let recs = engine.evaluate(&subs, &profile(5.0, 1));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].service, "Alpha");
        assert_eq!(recs[1].service, "Beta");
    }

    #[test]
    fn test_multiple_rules_fire_for_one_subscription() {
        let engine = RecommendationEngine::default();
        let subs = vec![
            subscription("Showmax", "Standard", 99.0),
            subscription("DStv", "Compact", 449.0),
        ];
        // Light usage: Showmax attracts downgrade, cancel, bundle, and
        // switch suggestions simultaneously.
        let recs = engine.evaluate(&subs, &profile(1.0, 1));
        let showmax = actions_for(&recs, "Showmax");

        assert!(showmax.iter().any(|a| matches!(a, Action::Downgrade { .. })));
        assert!(showmax.iter().any(|a| matches!(a, Action::Cancel { .. })));
        assert!(showmax.iter().any(|a| matches!(a, Action::Bundle { .. })));
        assert!(showmax.iter().any(|a| matches!(a, Action::Switch { .. })));
    }

    #[test]
    fn test_music_tiers_without_screen_counts_never_downgrade() {
        let engine = RecommendationEngine::default();
        let subs = vec![subscription("Spotify", "Family", 109.99)];
        let recs = engine.evaluate(&subs, &profile(5.0, 1));
        assert!(
            !recs
                .iter()
                .any(|r| matches!(r.action, Action::Downgrade { .. })),
            "tiers without max_screens are not downgrade candidates"
        );
        // Switch suggestions still apply.
        assert!(recs.iter().any(|r| matches!(r.action, Action::Switch { .. })));
    }
}
