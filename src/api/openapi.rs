use utoipa::OpenApi;

use crate::{
    api::models::{ErrorResponse, GroupRequest, HomeStats, ShareRequest, TransactionRequest, UserRequest},
    core::models::{
        balance::Balance,
        group::Group,
        transaction::{Share, Transaction},
        user::User,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::home_stats,
        super::handlers::list_users,
        super::handlers::create_user,
        super::handlers::get_user,
        super::handlers::update_user,
        super::handlers::delete_user,
        super::handlers::list_groups,
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::get_group_users,
        super::handlers::update_group,
        super::handlers::delete_group,
        super::handlers::get_group_transactions,
        super::handlers::create_group_transaction,
        super::handlers::get_group_balances,
        super::handlers::update_transaction,
        super::handlers::delete_transaction
    ),
    components(schemas(
        UserRequest,
        GroupRequest,
        ShareRequest,
        TransactionRequest,
        HomeStats,
        ErrorResponse,
        User,
        Group,
        Share,
        Transaction,
        Balance
    )),
    info(
        title = "Splitbook API",
        description = "API for splitting group expenses and computing member balances",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
