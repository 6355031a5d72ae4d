pub mod expense;
pub mod insights;
pub mod recommendation;
pub mod settings;

pub use expense::{Expense, NewExpense};
pub use insights::{
    BudgetPlan, CategoryTotal, ExpenseData, Insights, RecommendationStats, SavingOpportunity,
};
pub use recommendation::Recommendation;
pub use settings::{AiProvider, AiSettings, Settings};
