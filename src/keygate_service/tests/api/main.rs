mod accounts;
mod helpers;
mod verification;
