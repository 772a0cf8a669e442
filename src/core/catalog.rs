//! Static `resource type -> (category, shape)` table.
//!
//! Shape identifiers name the icon a renderer should use; they carry no meaning inside
//! this crate beyond being stable strings.

use crate::domain::model::{Category, NodeKind};
use std::collections::HashMap;
use std::sync::LazyLock;

pub const GENERAL_SHAPE: &str = "General";

pub const FALLBACK: NodeKind = NodeKind {
    category: Category::General,
    shape: GENERAL_SHAPE,
};

use Category::*;

const ENTRIES: &[(&str, Category, &str)] = &[
    // compute
    ("aws_instance", Compute, "EC2"),
    ("aws_autoscaling_group", Compute, "AutoScaling"),
    ("aws_lambda_function", Compute, "Lambda"),
    ("aws_batch_compute_environment", Compute, "Batch"),
    ("aws_elastic_beanstalk_application", Compute, "ElasticBeanstalk"),
    ("aws_eks_cluster", Compute, "EKS"),
    ("aws_ecs_cluster", Compute, "ECS"),
    ("aws_ecs_service", Compute, "ECS"),
    ("aws_ecs_task_definition", Compute, "ElasticContainerServiceService"),
    ("aws_lightsail_instance", Compute, "Lightsail"),
    ("aws_outposts", Compute, "Outposts"),
    ("aws_serverless_application_repository", Compute, "SAR"),
    ("aws_app_runner_service", Compute, "AppRunner"),
    ("aws_fargate_task", Compute, "Fargate"),
    ("aws_ec2_spot", Compute, "EC2SpotInstance"),
    ("aws_ec2_image_builder", Compute, "EC2ImageBuilder"),
    ("aws_compute_optimizer", Compute, "ComputeOptimizer"),
    ("aws_wavelength", Compute, "Wavelength"),
    ("aws_thinkbox_deadline", Compute, "ThinkboxDeadline"),
    ("aws_thinkbox_frost", Compute, "ThinkboxFrost"),
    ("aws_thinkbox_krakatoa", Compute, "ThinkboxKrakatoa"),
    ("aws_thinkbox_sequoia", Compute, "ThinkboxSequoia"),
    ("aws_thinkbox_stoke", Compute, "ThinkboxStoke"),
    ("aws_ecr_repository", Compute, "ECR"),
    // network
    ("aws_vpc", Network, "VPC"),
    ("aws_internet_gateway", Network, "InternetGateway"),
    ("aws_subnet", Network, "PublicSubnet"),
    ("aws_route_table", Network, "RouteTable"),
    ("aws_nat_gateway", Network, "NATGateway"),
    ("aws_transit_gateway", Network, "TransitGateway"),
    ("aws_lb", Network, "ElasticLoadBalancing"),
    ("aws_alb", Network, "ApplicationLoadBalancer"),
    ("aws_nlb", Network, "NetworkLoadBalancer"),
    ("aws_cloudfront_distribution", Network, "CloudFront"),
    ("aws_route53_zone", Network, "Route53"),
    ("aws_api_gateway_rest_api", Network, "APIGateway"),
    ("aws_api_gateway_v2_api", Network, "APIGatewayEndpoint"),
    ("aws_apigatewayv2_api", Network, "APIGatewayEndpoint"),
    ("aws_vpc_endpoint", Network, "Endpoint"),
    ("aws_vpc_peering_connection", Network, "VPCPeering"),
    ("aws_direct_connect", Network, "DirectConnect"),
    ("aws_global_accelerator", Network, "GlobalAccelerator"),
    ("aws_app_mesh", Network, "AppMesh"),
    ("aws_cloud_map", Network, "CloudMap"),
    ("aws_service_discovery_service", Network, "CloudMap"),
    ("aws_elastic_load_balancing", Network, "ElasticLoadBalancing"),
    ("aws_cloudfront_streamingdistribution", Network, "CloudFrontStreamingDistribution"),
    ("aws_vpc_flow_logs", Network, "VPCFlowLogs"),
    ("aws_network_firewall", Network, "NetworkFirewall"),
    // storage
    ("aws_s3_bucket", Storage, "S3"),
    ("aws_efs_file_system", Storage, "EFS"),
    ("aws_fsx_lustre_file_system", Storage, "FSx"),
    ("aws_fsx_windows_file_system", Storage, "FSx"),
    ("aws_fsx_ontap_file_system", Storage, "FSx"),
    ("aws_storage_gateway", Storage, "StorageGateway"),
    ("aws_backup_vault", Storage, "Backup"),
    ("aws_ebs_volume", Storage, "EBS"),
    ("aws_s3_glacier", Storage, "S3Glacier"),
    // database
    ("aws_db_instance", Database, "RDS"),
    ("aws_rds_cluster", Database, "Aurora"),
    ("aws_dynamodb_table", Database, "Dynamodb"),
    ("aws_elasticache_cluster", Database, "ElastiCache"),
    ("aws_elasticache_replication_group", Database, "ElastiCache"),
    ("aws_neptune_cluster", Database, "Neptune"),
    ("aws_redshift_cluster", Database, "Redshift"),
    ("aws_documentdb_cluster", Database, "DocumentDB"),
    ("aws_timestream_database", Database, "Timestream"),
    ("aws_keyspaces_keyspace", Database, "KeyspacesManagedApacheCassandraService"),
    ("aws_qldb_ledger", Database, "QLDB"),
    ("aws_dms_replication_instance", Database, "DatabaseMigrationService"),
    ("aws_dax_cluster", Database, "DynamodbDax"),
    ("aws_dms_event_subscription", Database, "Database"),
    ("aws_memorydb_cluster", Database, "ElasticacheForMemcached"),
    // security
    ("aws_acm_certificate", Security, "ACM"),
    ("aws_waf_web_acl", Security, "WAF"),
    ("aws_iam_role", Security, "IAM"),
    ("aws_iam_user", Security, "IAMPermissions"),
    ("aws_iam_group", Security, "IAMRole"),
    ("aws_iam_policy", Security, "IAMPermissions"),
    ("aws_kms_key", Security, "KMS"),
    ("aws_cognito_user_pool", Security, "Cognito"),
    ("aws_cognito_identity_pool", Security, "Cognito"),
    ("aws_secrets_manager_secret", Security, "SecretsManager"),
    ("aws_inspector_assessment_template", Security, "Inspector"),
    ("aws_shield_protection", Security, "Shield"),
    ("aws_security_hub_hub", Security, "SecurityHub"),
    ("aws_directory_service_directory", Security, "DirectoryService"),
    ("aws_artifact", Security, "Artifact"),
    ("aws_certificate_authority", Security, "CertificateManager"),
    ("aws_detective", Security, "Detective"),
    ("aws_firewall_manager", Security, "FirewallManager"),
    ("aws_key_management_service", Security, "KeyManagementService"),
    ("aws_resource_access_manager", Security, "ResourceAccessManager"),
    ("aws_single_sign_on", Security, "SingleSignOn"),
    ("aws_waf", Security, "WAF"),
    ("aws_waf_regional", Security, "WAF"),
    // integration
    ("aws_api_gateway", Integration, "APIGateway"),
    ("aws_sns_topic", Integration, "SNS"),
    ("aws_sqs_queue", Integration, "SQS"),
    ("aws_cloudwatch_event_rule", Integration, "CloudwatchEventRule"),
    ("aws_step_functions_state_machine", Integration, "StepFunctions"),
    ("aws_mq_broker", Integration, "MQ"),
    ("aws_application_integration", Integration, "ApplicationIntegration"),
    ("aws_console_mobile_application", Integration, "ConsoleMobileApplication"),
    ("aws_cloudwatch_event_bus", Integration, "EventbridgeCustomEventBusResource"),
    ("aws_express_workflows", Integration, "ExpressWorkflows"),
    // management
    ("aws_cloudwatch_dashboard", Management, "Cloudwatch"),
    ("aws_cloudwatch_alarm", Management, "CloudwatchAlarm"),
    ("aws_cloudwatch_log_group", Management, "CloudwatchLogs"),
    ("aws_cloudtrail", Management, "Cloudtrail"),
    ("aws_config", Management, "Config"),
    ("aws_organizations_organization", Management, "Organizations"),
    ("aws_auto_scaling", Management, "AutoScaling"),
    ("aws_systems_manager_parameter", Management, "SystemsManager"),
    ("aws_ssm_parameter", Management, "SystemsManager"),
    ("aws_ssm_document", Management, "SystemsManagerDocuments"),
    ("aws_license_manager", Management, "LicenseManager"),
    ("aws_service_catalog_portfolio", Management, "ServiceCatalog"),
    ("aws_trusted_advisor", Management, "TrustedAdvisor"),
    ("aws_well_architected_tool", Management, "WellArchitectedTool"),
    ("aws_control_tower", Management, "ControlTower"),
    // analytics
    ("aws_athena", Analytics, "Athena"),
    ("aws_emr_cluster", Analytics, "EMR"),
    ("aws_glue_crawler", Analytics, "Glue"),
    ("aws_glue_job", Analytics, "GlueCrawlers"),
    ("aws_glue_catalog", Analytics, "GlueDataCatalog"),
    ("aws_kinesis_stream", Analytics, "KinesisDataStreams"),
    ("aws_kinesis_firehose_delivery_stream", Analytics, "KinesisDataFirehose"),
    ("aws_kinesis_analytics_application", Analytics, "KinesisDataAnalytics"),
    ("aws_quicksight", Analytics, "Quicksight"),
    ("aws_data_pipeline", Analytics, "DataPipeline"),
    ("aws_lake_formation", Analytics, "LakeFormation"),
    ("aws_elasticsearch_domain", Analytics, "ElasticsearchService"),
    ("aws_msk_cluster", Analytics, "ManagedStreamingForKafka"),
    // machine learning
    ("aws_sagemaker_notebook_instance", MachineLearning, "SagemakerNotebook"),
    ("aws_sagemaker_model", MachineLearning, "Sagemaker"),
    ("aws_sagemaker_training_job", MachineLearning, "SagemakerTrainingJob"),
    ("aws_sagemaker_endpoint", MachineLearning, "SagemakerModel"),
    ("aws_comprehend", MachineLearning, "Comprehend"),
    ("aws_rekognition", MachineLearning, "Rekognition"),
    ("aws_polly", MachineLearning, "Polly"),
    ("aws_textract", MachineLearning, "Textract"),
    ("aws_lex", MachineLearning, "Lex"),
    ("aws_forecast", MachineLearning, "Forecast"),
    ("aws_personalize", MachineLearning, "Personalize"),
    ("aws_translate", MachineLearning, "Translate"),
    ("aws_transcribe", MachineLearning, "Transcribe"),
    ("aws_deep_learning_containers", MachineLearning, "DeepLearningContainers"),
    ("aws_elastic_inference", MachineLearning, "ElasticInference"),
    ("aws_fraud_detector", MachineLearning, "FraudDetector"),
    ("aws_kendra", MachineLearning, "Kendra"),
    // iot
    ("aws_iot_core", Iot, "IotCore"),
    ("aws_iot_analytics", Iot, "IotAnalytics"),
    ("aws_iot_button", Iot, "IotButton"),
    ("aws_iot_certificate", Iot, "IotCertificate"),
    ("aws_iot_device_defender", Iot, "IotDeviceDefender"),
    ("aws_iot_device_management", Iot, "IotDeviceManagement"),
    ("aws_iot_events", Iot, "IotEvents"),
    ("aws_iot_greengrass", Iot, "IotGreengrass"),
    ("aws_iot_policy", Iot, "IotPolicy"),
    ("aws_iot_rule", Iot, "IotRule"),
    ("aws_iot_sitewise", Iot, "IotSitewise"),
    ("aws_iot_things_graph", Iot, "IotThingsGraph"),
    ("aws_iot_1click", Iot, "Iot1Click"),
    // mobile
    ("aws_amplify", Mobile, "Amplify"),
    ("aws_amplify_console", Mobile, "Amplify"),
    ("aws_appsync", Mobile, "Appsync"),
    ("aws_device_farm", Mobile, "DeviceFarm"),
    ("aws_pinpoint", Mobile, "Pinpoint"),
    // everything else
    ("aws_managed_blockchain", Blockchain, "ManagedBlockchain"),
    ("aws_alexa_for_business", Business, "AlexaForBusiness"),
    ("aws_chime", Business, "Chime"),
    ("aws_workmail", Business, "Workmail"),
    ("aws_connect", Engagement, "Connect"),
    ("aws_elastic_transcoder", Media, "ElasticTranscoder"),
    ("aws_elemental_mediaconnect", Media, "ElementalMediaconnect"),
    ("aws_elemental_mediaconvert", Media, "ElementalMediaconvert"),
    ("aws_elemental_medialive", Media, "ElementalMedialive"),
    ("aws_elemental_mediapackage", Media, "ElementalMediapackage"),
    ("aws_elemental_mediastore", Media, "ElementalMediastore"),
    ("aws_elemental_mediatailor", Media, "ElementalMediatailor"),
    ("aws_application_discovery_service", Migration, "ApplicationDiscoveryService"),
    ("aws_cloudendure_migration", Migration, "CloudendureMigration"),
    ("aws_database_migration_service", Migration, "DatabaseMigrationService"),
    ("aws_datasync", Migration, "Datasync"),
    ("aws_migration_hub", Migration, "MigrationHub"),
    ("aws_server_migration_service", Migration, "ServerMigrationService"),
    ("aws_snowball", Migration, "Snowball"),
    ("aws_snowball_edge", Migration, "SnowballEdge"),
    ("aws_snowmobile", Migration, "Snowmobile"),
    ("aws_braket", Quantum, "Braket"),
    ("aws_ground_station", Satellite, "GroundStation"),
    ("aws_robomaker", Robotics, "Robomaker"),
    ("aws_marketplace", General, "Marketplace"),
    ("aws_general", General, GENERAL_SHAPE),
];

static CATALOG: LazyLock<HashMap<&'static str, NodeKind>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|&(resource_type, category, shape)| (resource_type, NodeKind { category, shape }))
        .collect()
});

pub fn lookup(resource_type: &str) -> Option<NodeKind> {
    CATALOG.get(resource_type).copied()
}

pub fn len() -> usize {
    CATALOG.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entries_are_unique() {
        let mut seen = HashSet::new();
        for (resource_type, _, _) in ENTRIES {
            assert!(seen.insert(*resource_type), "duplicate entry {}", resource_type);
        }
        assert_eq!(len(), ENTRIES.len());
    }

    #[test]
    fn test_lookup() {
        let kind = lookup("aws_rds_cluster").unwrap();
        assert_eq!(kind.category, Category::Database);
        assert_eq!(kind.shape, "Aurora");
        assert!(lookup("aws_totally_unknown_thing").is_none());
    }
}
