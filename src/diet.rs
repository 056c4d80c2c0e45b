use std::collections::HashSet;

/// Which weekly meal plan is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanKind {
    #[default]
    Veg,
    NonVeg,
}

/// One day of a weekly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPlan {
    pub day: &'static str,
    pub meals: &'static [&'static str],
}

/// The seven-day plan for a given kind
pub fn plan(kind: PlanKind) -> &'static [DayPlan] {
    match kind {
        PlanKind::Veg => VEG_PLAN,
        PlanKind::NonVeg => NONVEG_PLAN,
    }
}

/// Collapsible day-card state for the diet plan viewer.
///
/// Switching plans collapses every card, matching a fresh render.
#[derive(Debug, Clone, Default)]
pub struct DietView {
    kind: PlanKind,
    expanded: HashSet<usize>,
}

impl DietView {
    pub fn new() -> Self {
        DietView::default()
    }

    pub fn kind(&self) -> PlanKind {
        self.kind
    }

    pub fn days(&self) -> &'static [DayPlan] {
        plan(self.kind)
    }

    /// Select a plan, collapsing all day cards
    pub fn select(&mut self, kind: PlanKind) {
        self.kind = kind;
        self.expanded.clear();
    }

    /// Flip one day card; returns whether it is now expanded
    pub fn toggle_day(&mut self, day: usize) -> bool {
        if self.expanded.remove(&day) {
            false
        } else {
            self.expanded.insert(day);
            true
        }
    }

    pub fn is_expanded(&self, day: usize) -> bool {
        self.expanded.contains(&day)
    }
}

const VEG_PLAN: &[DayPlan] = &[
    DayPlan {
        day: "Day 1",
        meals: &[
            "6:30 AM — Oats porridge with milk & banana",
            "9:30 AM — Peanut butter sandwich",
            "12:30 PM — Paneer bhurji + roti",
            "4:00 PM — Nuts & fruit shake",
            "7:30 PM — Dal + Rice + Veg sabzi",
            "9:30 PM — Glass of milk",
        ],
    },
    DayPlan {
        day: "Day 2",
        meals: &[
            "6:30 AM — Poha + milk",
            "9:30 AM — Sprouts salad",
            "12:30 PM — Rajma + Rice",
            "4:00 PM — Protein smoothie (milk, banana, oats)",
            "7:30 PM — Paneer tikka + roti",
            "9:30 PM — Greek yogurt",
        ],
    },
    DayPlan {
        day: "Day 3",
        meals: &[
            "6:30 AM — Idli + sambar + coconut chutney",
            "9:30 AM — Fruit & nuts",
            "12:30 PM — Chole + rice",
            "4:00 PM — Peanut-choco shake",
            "7:30 PM — Mixed veg + quinoa",
            "9:30 PM — Warm milk",
        ],
    },
    DayPlan {
        day: "Day 4",
        meals: &[
            "6:30 AM — Upma + milk",
            "9:30 AM — Banana & almonds",
            "12:30 PM — Veg pulao + raita",
            "4:00 PM — Hummus & veg sticks",
            "7:30 PM — Paneer curry + chapati",
            "9:30 PM — Cottage cheese",
        ],
    },
    DayPlan {
        day: "Day 5",
        meals: &[
            "6:30 AM — Paratha + curd",
            "9:30 AM — Protein smoothie",
            "12:30 PM — Dal + rice + salad",
            "4:00 PM — Cheese sandwich",
            "7:30 PM — Rajma + roti",
            "9:30 PM — Milk & honey",
        ],
    },
    DayPlan {
        day: "Day 6",
        meals: &[
            "6:30 AM — Smoothie bowl",
            "9:30 AM — Nuts & dried fruit",
            "12:30 PM — Soya chaap + rice",
            "4:00 PM — Protein shake",
            "7:30 PM — Mixed lentils + veg",
            "9:30 PM — Curd & fruit",
        ],
    },
    DayPlan {
        day: "Day 7",
        meals: &[
            "6:30 AM — Muesli with milk",
            "9:30 AM — Peanut butter toast",
            "12:30 PM — Paneer biryani",
            "4:00 PM — Fruit shake",
            "7:30 PM — Veg kebabs + roti",
            "9:30 PM — Warm milk",
        ],
    },
];

const NONVEG_PLAN: &[DayPlan] = &[
    DayPlan {
        day: "Day 1",
        meals: &[
            "6:30 AM — Eggs (3) + toast",
            "9:30 AM — Chicken sandwich",
            "12:30 PM — Chicken curry + rice",
            "4:00 PM — Tuna salad",
            "7:30 PM — Fish + veg",
            "9:30 PM — Glass of milk",
        ],
    },
    DayPlan {
        day: "Day 2",
        meals: &[
            "6:30 AM — Omelette + oats",
            "9:30 AM — Greek yogurt + honey",
            "12:30 PM — Grilled chicken + quinoa",
            "4:00 PM — Nuts & boiled egg",
            "7:30 PM — Egg fried rice",
            "9:30 PM — Cottage cheese",
        ],
    },
    DayPlan {
        day: "Day 3",
        meals: &[
            "6:30 AM — Scrambled eggs + avocado",
            "9:30 AM — Protein shake",
            "12:30 PM — Fish curry + rice",
            "4:00 PM — Chicken salad",
            "7:30 PM — Grilled prawns",
            "9:30 PM — Warm milk",
        ],
    },
    DayPlan {
        day: "Day 4",
        meals: &[
            "6:30 AM — Egg whites + toast",
            "9:30 AM — Nut butter banana",
            "12:30 PM — Mutton curry + rice",
            "4:00 PM — Protein bar",
            "7:30 PM — Chicken stir-fry",
            "9:30 PM — Yogurt",
        ],
    },
    DayPlan {
        day: "Day 5",
        meals: &[
            "6:30 AM — Boiled eggs + fruit",
            "9:30 AM — Paneer and egg sandwich",
            "12:30 PM — Fish + potatoes",
            "4:00 PM — Smoothie",
            "7:30 PM — Grilled chicken",
            "9:30 PM — Milk",
        ],
    },
    DayPlan {
        day: "Day 6",
        meals: &[
            "6:30 AM — Omelette + veggies",
            "9:30 AM — Cheese & fruit",
            "12:30 PM — Chicken biryani",
            "4:00 PM — Nuts & protein shake",
            "7:30 PM — Fish curry",
            "9:30 PM — Curd",
        ],
    },
    DayPlan {
        day: "Day 7",
        meals: &[
            "6:30 AM — Eggs + oats",
            "9:30 AM — Protein shake",
            "12:30 PM — Grilled mackerel + rice",
            "4:00 PM — Chicken wrap",
            "7:30 PM — Lamb stew",
            "9:30 PM — Warm milk",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_plans_cover_a_full_week() {
        for kind in [PlanKind::Veg, PlanKind::NonVeg] {
            let days = plan(kind);
            assert_eq!(days.len(), 7);
            assert!(days.iter().all(|d| d.meals.len() == 6));
        }
    }

    #[test]
    fn toggling_flips_one_card() {
        let mut view = DietView::new();
        assert!(!view.is_expanded(2));
        assert!(view.toggle_day(2));
        assert!(view.is_expanded(2));
        assert!(!view.toggle_day(2));
        assert!(!view.is_expanded(2));
    }

    #[test]
    fn switching_plans_collapses_everything() {
        let mut view = DietView::new();
        view.toggle_day(0);
        view.toggle_day(3);
        view.select(PlanKind::NonVeg);
        assert_eq!(view.kind(), PlanKind::NonVeg);
        assert!(!view.is_expanded(0));
        assert!(!view.is_expanded(3));
    }
}
