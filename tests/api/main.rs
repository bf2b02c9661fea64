mod health_check;
mod home;
mod subscriptions_detail;
mod subscriptions_new;
